use super::{SessionState, SESSION_BLOB_LEN};

/// Why the device booted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootReason {
    /// First power-up or manual reset
    ColdBoot,
    /// Resumed after a deep-sleep timer expired
    DeepSleepWake,
    /// Watchdog or panic reset
    ErrorReset,
}

/// Non-volatile storage backend for the session blob
pub trait NonVolatileStore {
    /// Backend error type
    type Error;

    /// Write `blob`, replacing any previous one
    fn save(&mut self, blob: &[u8]) -> Result<(), Self::Error>;

    /// Read the stored blob into `buf`, returning its length (0 when empty)
    fn load(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Remove the stored blob
    fn erase(&mut self) -> Result<(), Self::Error>;

    /// Report why the device booted
    fn boot_reason(&self) -> BootReason;
}

/// Session persistence policy over a storage backend.
///
/// The store is single-writer (the device itself) and read once at boot;
/// persistence must complete before any sleep transition, so failures are
/// surfaced to the caller rather than swallowed.
pub struct SessionStore<S: NonVolatileStore> {
    backend: S,
}

impl<S: NonVolatileStore> SessionStore<S> {
    /// Wrap a storage backend
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Persist `session`, marking it as stored
    pub fn persist(&mut self, session: &mut SessionState) -> Result<(), S::Error> {
        session.persisted = true;
        self.backend.save(&session.encode())
    }

    /// Restore the last persisted session, if a valid one exists
    pub fn restore(&mut self) -> Option<SessionState> {
        let mut buf = [0u8; SESSION_BLOB_LEN];
        match self.backend.load(&mut buf) {
            Ok(len) => SessionState::decode(&buf[..len]),
            Err(_) => None,
        }
    }

    /// Remove any persisted session
    pub fn erase(&mut self) -> Result<(), S::Error> {
        self.backend.erase()
    }

    /// Why the device booted
    pub fn boot_reason(&self) -> BootReason {
        self.backend.boot_reason()
    }

    /// Session to adopt at boot, if any.
    ///
    /// A persisted session is only trusted when the device is resuming from
    /// deep sleep and its failure count has not crossed `rejoin_threshold`;
    /// everything else (cold boot, error reset, stale failure count, corrupt
    /// blob) yields `None` and the caller performs a full join. A session
    /// carried across repeated delivery failures may be desynchronized from
    /// the network's frame counters, and uplinks on it would keep failing
    /// indefinitely.
    pub fn restore_for_boot(&mut self, rejoin_threshold: u32) -> Option<SessionState> {
        if self.boot_reason() != BootReason::DeepSleepWake {
            return None;
        }
        let session = self.restore()?;
        if session.joined && session.consecutive_failures <= rejoin_threshold {
            Some(session)
        } else {
            None
        }
    }

    /// Tear down the store, returning the backend
    pub fn into_backend(self) -> S {
        self.backend
    }
}
