//! Asynchronous radio event handling
//!
//! The radio raises up to three event flags per callback invocation; one
//! [`NoiseDevice::process_events`] pass reads them once and handles each
//! independently, since they may co-occur. The radio serializes event delivery,
//! so the handler is never re-entered.

use heapless::Vec;

use crate::radio::traits::{Radio, RadioEvents};
use crate::session::store::NonVolatileStore;
use crate::status::StatusSignal;

use super::power::SleepControl;
use super::{DeviceError, DeviceState, NoiseDevice, MAX_PAYLOAD_SIZE};

/// Downlink frame handed to the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Downlink {
    /// Destination port carried by the frame
    pub port: u8,
    /// Application payload
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

/// Outcome of the last transmit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxOutcome {
    /// Unconfirmed uplink left the radio
    Delivered,
    /// Confirmed uplink was acknowledged by the network
    Acknowledged,
    /// Radio retries were exhausted without an acknowledgment
    Failed,
}

/// What a single [`NoiseDevice::process_events`] pass observed
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EventReport {
    /// Downlink frame, if a receive event was pending
    pub downlink: Option<Downlink>,
    /// Transmit outcome, if a transmit event was pending
    pub tx: Option<TxOutcome>,
}

impl<R, S, P, L> NoiseDevice<R, S, P, L>
where
    R: Radio,
    S: NonVolatileStore,
    P: SleepControl,
    L: StatusSignal,
{
    /// Drain and handle the radio's pending event flags.
    ///
    /// Drives the failure-counter/rejoin policy and, after a completed
    /// transmit cycle with a sleep interval configured, the
    /// persist-then-sleep transition. A failed confirmed uplink never leads
    /// to sleep from here; the device must attempt a rejoin first.
    pub fn process_events(&mut self) -> Result<EventReport, DeviceError<R::Error, S::Error>> {
        let events = self.radio.events();
        let mut report = EventReport::default();

        if events.contains(RadioEvents::RX_PACKET) {
            let mut buf = [0u8; MAX_PAYLOAD_SIZE];
            let (len, port) = self.radio.recv(&mut buf).map_err(DeviceError::Radio)?;
            let mut payload = Vec::new();
            // recv never yields more than the buffer holds
            let _ = payload.extend_from_slice(&buf[..len]);
            log::debug!("port: {}, frame: {} bytes", port, len);
            report.downlink = Some(Downlink { port, payload });
        }

        if events.contains(RadioEvents::TX_PACKET) {
            let stats = self.radio.stats();
            log::info!(
                "tx_time_on_air: {} ms, @dr {}, trials: {}",
                stats.tx_time_on_air_ms,
                stats.data_rate,
                stats.tx_trials
            );
            // A completed cycle on a confirmed uplink means the ack arrived;
            // without one the radio raises TX_FAILED instead.
            report.tx = Some(if self.pending_confirmed {
                self.session.record_delivery();
                TxOutcome::Acknowledged
            } else {
                TxOutcome::Delivered
            });
            self.state = DeviceState::Ready;
        }

        if events.contains(RadioEvents::TX_FAILED) {
            let failures = self.session.record_failure();
            log::warn!("sending failed ({} consecutive)", failures);
            report.tx = Some(TxOutcome::Failed);
            self.state = DeviceState::Ready;
            if self.pending_confirmed && failures == self.config.rejoin_threshold {
                // the session is likely desynchronized; rejoining is the
                // only self-healing path
                log::warn!("delivery failures reached {}, rejoining", failures);
                self.session.joined = false;
                self.join_network()?;
            }
        }

        // sleep only follows a completed transmit cycle, never a failure
        if matches!(
            report.tx,
            Some(TxOutcome::Delivered | TxOutcome::Acknowledged)
        ) && self.config.deepsleep_ms > 0
        {
            let interval = self.config.deepsleep_ms;
            self.maybe_sleep(interval).map_err(DeviceError::Storage)?;
        }

        Ok(report)
    }
}
