use bitflags::bitflags;

use crate::config::device::{ActivationKeys, RadioParameters};

bitflags! {
    /// Event flags raised by the radio.
    ///
    /// Several flags may be set per callback invocation; the radio
    /// serializes event delivery, so one [`Radio::events`] read drains the
    /// pending set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RadioEvents: u8 {
        /// A downlink frame is available
        const RX_PACKET = 1 << 0;
        /// The transmit cycle for the last frame ended
        const TX_PACKET = 1 << 1;
        /// Configured retries were exhausted without an acknowledgment
        const TX_FAILED = 1 << 2;
    }
}

/// Transmit statistics for the last completed cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TxStats {
    /// Airtime of the last transmission, in milliseconds
    pub tx_time_on_air_ms: u32,
    /// Data rate the frame left with
    pub data_rate: u8,
    /// Transmission attempts used, including retries
    pub tx_trials: u8,
}

/// Failure of a blocking join attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinError<E> {
    /// The join did not complete within the configured timeout
    Timeout,
    /// The radio failed while executing the handshake
    Transport(E),
}

/// LoRaWAN transceiver interface
///
/// Modulation, channel access, MAC framing and payload encryption all live
/// behind this trait; the device core only orchestrates session and retry
/// state around it.
pub trait Radio {
    /// Error type for radio operations
    type Error;

    /// Apply the radio parameters
    fn configure(&mut self, params: &RadioParameters) -> Result<(), Self::Error>;

    /// Enable channel slot `index` at `frequency` with the given data-rate
    /// range
    fn add_channel(
        &mut self,
        index: u8,
        frequency: u32,
        dr_min: u8,
        dr_max: u8,
    ) -> Result<(), Self::Error>;

    /// Disable channel slot `index`
    fn remove_channel(&mut self, index: u8) -> Result<(), Self::Error>;

    /// Join the network, blocking until joined or `timeout_ms` elapses.
    ///
    /// ABP activation constructs the session locally and returns
    /// immediately; the timeout only applies to the OTAA handshake.
    fn join(
        &mut self,
        keys: &ActivationKeys,
        timeout_ms: u32,
        data_rate: u8,
    ) -> Result<(), JoinError<Self::Error>>;

    /// Whether the radio currently holds a network session
    fn has_joined(&self) -> bool;

    /// Enqueue an uplink frame and return immediately.
    ///
    /// Errors are local conditions only; delivery outcome is reported later
    /// through [`Radio::events`].
    fn send(&mut self, payload: &[u8], confirmed: bool) -> Result<(), Self::Error>;

    /// Read and clear the pending event flags
    fn events(&mut self) -> RadioEvents;

    /// Read the pending downlink frame into `buf`, returning its length and
    /// destination port
    fn recv(&mut self, buf: &mut [u8]) -> Result<(usize, u8), Self::Error>;

    /// Statistics for the last transmit cycle
    fn stats(&self) -> TxStats;
}
