//! High-level LoRaWAN device interface
//!
//! This module owns the one explicit device state machine
//! (`Idle → Joining → Ready → Sending`, with `Sleeping` as the terminal
//! low-power state) and the join/retry policy around it. All hardware is
//! injected: the radio, the non-volatile store, the sleep primitive and the
//! status LED are capability traits, and constructing a device has no side
//! effects; [`NoiseDevice::start`] is the explicit initialization step.

use crate::{
    channel::ChannelPlan,
    config::device::{DeviceConfig, LoraMode},
    radio::traits::{JoinError, Radio},
    session::{
        store::{NonVolatileStore, SessionStore},
        SessionState,
    },
    status::{pattern, StatusSignal, StatusState},
};

/// Asynchronous radio event handling
pub mod events;

/// Persist-then-sleep control
pub mod power;

use power::SleepControl;

/// Largest application payload accepted by [`NoiseDevice::send`], in bytes
pub const MAX_PAYLOAD_SIZE: usize = 242;

/// Sleep applied after a failed join before the next attempt, in
/// milliseconds. Bounds power and airtime use compared to busy-retrying.
pub const JOIN_BACKOFF_MS: u32 = 30_000;

/// Device state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    /// Not started, or join fell through
    Idle,
    /// OTAA handshake in progress; the radio is owned by the join
    Joining,
    /// Joined and able to accept uplinks
    Ready,
    /// An uplink is in flight; outcome arrives via the event flags
    Sending,
    /// Session persisted and device suspended
    Sleeping,
}

/// LoRaWAN device error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError<RE, SE> {
    /// Radio error
    Radio(RE),
    /// Non-volatile storage error
    Storage(SE),
    /// The join did not complete within the configured timeout
    JoinTimeout,
    /// Invalid configuration (e.g. raw mode on a LoRaWAN device)
    InvalidConfig,
}

impl<RE, SE> From<JoinError<RE>> for DeviceError<RE, SE> {
    fn from(error: JoinError<RE>) -> Self {
        match error {
            JoinError::Timeout => DeviceError::JoinTimeout,
            JoinError::Transport(e) => DeviceError::Radio(e),
        }
    }
}

/// Synchronous uplink submission error.
///
/// Only local conditions are reported here; a missing acknowledgment is an
/// asynchronous [`TxOutcome::Failed`], never a `SendError`.
///
/// [`TxOutcome::Failed`]: events::TxOutcome::Failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError<RE> {
    /// Payload exceeds [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
    /// No network session; start the device first
    NotJoined,
    /// The radio is joining or already transmitting
    Busy,
    /// The radio rejected the frame
    Radio(RE),
}

/// LoRaWAN device implementation
pub struct NoiseDevice<R, S, P, L>
where
    R: Radio,
    S: NonVolatileStore,
    P: SleepControl,
    L: StatusSignal,
{
    radio: R,
    store: SessionStore<S>,
    sleeper: P,
    status: L,
    config: DeviceConfig,
    plan: ChannelPlan,
    session: SessionState,
    state: DeviceState,
    /// Whether the uplink currently in flight asked for an acknowledgment
    pending_confirmed: bool,
}

impl<R, S, P, L> NoiseDevice<R, S, P, L>
where
    R: Radio,
    S: NonVolatileStore,
    P: SleepControl,
    L: StatusSignal,
{
    /// Create a new device.
    ///
    /// Performs no hardware access; call [`NoiseDevice::start`] to configure
    /// the radio and bring the session up.
    pub fn new(
        radio: R,
        config: DeviceConfig,
        plan: ChannelPlan,
        store: S,
        sleeper: P,
        status: L,
    ) -> Self {
        Self {
            radio,
            store: SessionStore::new(store),
            sleeper,
            status,
            config,
            plan,
            session: SessionState::new(),
            state: DeviceState::Idle,
            pending_confirmed: false,
        }
    }

    /// Configure the radio, apply the channel plan and bring the device to
    /// [`DeviceState::Ready`], either by restoring a persisted session or
    /// by joining the network.
    pub fn start(&mut self) -> Result<(), DeviceError<R::Error, S::Error>> {
        if self.config.radio.mode != LoraMode::Lorawan {
            return Err(DeviceError::InvalidConfig);
        }
        log::info!("booting node in {} mode", self.config.keys.mode_name());

        self.radio
            .configure(&self.config.radio)
            .map_err(DeviceError::Radio)?;
        // channels must be set before the join request goes out
        self.plan.apply(&mut self.radio).map_err(DeviceError::Radio)?;

        if let Some(session) = self.store.restore_for_boot(self.config.rejoin_threshold) {
            log::info!(
                "restored session (confirmed tx: {}, failures: {})",
                session.consecutive_confirmed_tx,
                session.consecutive_failures
            );
            self.session = session;
            self.state = DeviceState::Ready;
            return Ok(());
        }

        // no trustworthy persisted session; clear whatever is stored and
        // join from scratch
        if self.store.erase().is_err() {
            log::warn!("could not clear stale session");
        }
        self.join_network()
    }

    /// Join the network with the configured activation keys.
    ///
    /// A join requested while one is already running is a no-op; this is the
    /// sole owner of radio-join state and concurrent joins are never issued.
    fn join_network(&mut self) -> Result<(), DeviceError<R::Error, S::Error>> {
        if self.state == DeviceState::Joining {
            return Ok(());
        }
        self.state = DeviceState::Joining;
        self.status.signal(pattern(StatusState::Joining));

        let params = &self.config.radio;
        match self
            .radio
            .join(&self.config.keys, params.join_timeout_ms, params.join_data_rate)
        {
            Ok(()) => {
                self.session.mark_joined();
                self.store
                    .persist(&mut self.session)
                    .map_err(DeviceError::Storage)?;
                self.status.signal(pattern(StatusState::Joined));
                self.state = DeviceState::Ready;
                log::info!("node joined the network");
                Ok(())
            }
            Err(error) => {
                log::warn!("join did not complete, backing off");
                self.state = DeviceState::Idle;
                // Sleep instead of busy-retrying; the next attempt happens
                // at the wake-up boot. Interactive profiles (sleep disabled)
                // get the error back instead.
                if self.config.deepsleep_ms > 0 && self.maybe_sleep(JOIN_BACKOFF_MS).is_err() {
                    log::error!("session persist failed, staying awake");
                }
                Err(error.into())
            }
        }
    }

    /// Submit an uplink and return without waiting for delivery.
    ///
    /// The outcome is reported asynchronously through
    /// [`NoiseDevice::process_events`]. Retransmission of confirmed frames
    /// is the radio's responsibility, bounded by the configured retry count.
    pub fn send(&mut self, payload: &[u8], confirmed: bool) -> Result<(), SendError<R::Error>> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(SendError::PayloadTooLarge);
        }
        match self.state {
            DeviceState::Ready => {}
            DeviceState::Joining | DeviceState::Sending => return Err(SendError::Busy),
            DeviceState::Idle | DeviceState::Sleeping => return Err(SendError::NotJoined),
        }
        if !self.radio.has_joined() {
            return Err(SendError::NotJoined);
        }

        self.status.signal(pattern(StatusState::Sending));
        log::debug!(
            "sending {} byte uplink (confirmed: {})",
            payload.len(),
            confirmed
        );
        self.radio
            .send(payload, confirmed)
            .map_err(SendError::Radio)?;
        self.pending_confirmed = confirmed;
        self.state = DeviceState::Sending;
        Ok(())
    }

    /// Submit an uplink with the deployment's confirmed-delivery policy
    pub fn send_uplink(&mut self, payload: &[u8]) -> Result<(), SendError<R::Error>> {
        let confirmed = self.config.confirmed_uplinks;
        self.send(payload, confirmed)
    }

    /// Drop the in-memory session and wipe the persisted blob, forcing a
    /// fresh join at the next start
    pub fn erase_session(&mut self) -> Result<(), S::Error> {
        self.session = SessionState::new();
        self.state = DeviceState::Idle;
        self.store.erase()
    }

    /// Current device state
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Current session state
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Access the radio capability (e.g. to pump queued events in tests)
    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    /// Tear the device down, returning its capabilities
    pub fn free(self) -> (R, S, P, L) {
        (
            self.radio,
            self.store.into_backend(),
            self.sleeper,
            self.status,
        )
    }
}
