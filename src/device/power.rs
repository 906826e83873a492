//! Persist-then-sleep control
//!
//! A suspended device has no in-memory continuation; execution resumes at
//! the next boot and everything needed after wake must already be in the
//! non-volatile store. Persistence therefore completes (or fails
//! explicitly) before the device becomes unresponsive.

use crate::radio::traits::Radio;
use crate::session::store::NonVolatileStore;
use crate::status::StatusSignal;

use super::{DeviceState, NoiseDevice};

/// Whole-device suspend primitive.
///
/// On hardware `suspend_for` does not return; power is restored externally
/// by a timer or reset. Test doubles record the call and return so
/// scenarios can continue.
pub trait SleepControl {
    /// Suspend the device for `duration_ms` milliseconds
    fn suspend_for(&mut self, duration_ms: u32);
}

impl<R, S, P, L> NoiseDevice<R, S, P, L>
where
    R: Radio,
    S: NonVolatileStore,
    P: SleepControl,
    L: StatusSignal,
{
    /// Persist the session and suspend for `duration_ms`.
    ///
    /// A zero duration disables sleeping entirely and returns `Ok(false)`
    /// without touching the store. Otherwise the session is persisted
    /// first; a persist failure is retried once, and if the retry also
    /// fails the device stays awake and the storage error is returned;
    /// sleeping with an unpersisted session would guarantee a full rejoin
    /// after wake.
    pub fn maybe_sleep(&mut self, duration_ms: u32) -> Result<bool, S::Error> {
        if duration_ms == 0 {
            return Ok(false);
        }
        if self.store.persist(&mut self.session).is_err() {
            log::warn!("session persist failed, retrying before sleep");
            self.store.persist(&mut self.session)?;
        }
        log::info!("entering deep sleep for {} ms", duration_ms);
        self.state = DeviceState::Sleeping;
        self.sleeper.suspend_for(duration_ms);
        Ok(true)
    }
}
