//! Shared capability fakes for the device tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use noisenode::config::device::{ActivationKeys, RadioParameters};
use noisenode::device::power::SleepControl;
use noisenode::radio::traits::{JoinError, Radio, RadioEvents, TxStats};
use noisenode::session::store::{BootReason, NonVolatileStore};
use noisenode::status::{LedPattern, StatusSignal};
use rand_core::RngCore;

/// Mock capability error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Generic error
    Error,
}

/// How the mock radio answers join requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinBehavior {
    /// Every join succeeds
    Accept,
    /// Every join times out
    Timeout,
    /// The first join succeeds, later ones time out
    AcceptThenTimeout,
}

/// Mock radio for testing
pub struct MockRadio {
    pub configured: Option<RadioParameters>,
    pub added_channels: Vec<(u8, u32, u8, u8)>,
    pub removed_channels: Vec<u8>,
    pub join_behavior: JoinBehavior,
    pub join_calls: u32,
    pub last_join_keys: Option<ActivationKeys>,
    joined: bool,
    pub sent: Vec<(Vec<u8>, bool)>,
    events: VecDeque<RadioEvents>,
    rx_frame: Option<(Vec<u8>, u8)>,
    pub stats: TxStats,
}

impl MockRadio {
    /// Create new mock radio that accepts joins
    pub fn new() -> Self {
        Self {
            configured: None,
            added_channels: Vec::new(),
            removed_channels: Vec::new(),
            join_behavior: JoinBehavior::Accept,
            join_calls: 0,
            last_join_keys: None,
            joined: false,
            sent: Vec::new(),
            events: VecDeque::new(),
            rx_frame: None,
            stats: TxStats {
                tx_time_on_air_ms: 62,
                data_rate: 5,
                tx_trials: 1,
            },
        }
    }

    /// Queue an event set for the next `events()` read
    pub fn queue_events(&mut self, events: RadioEvents) {
        self.events.push_back(events);
    }

    /// Set the frame returned by the next `recv()` call
    pub fn set_rx(&mut self, payload: &[u8], port: u8) {
        self.rx_frame = Some((payload.to_vec(), port));
    }
}

impl Radio for MockRadio {
    type Error = MockError;

    fn configure(&mut self, params: &RadioParameters) -> Result<(), Self::Error> {
        self.configured = Some(params.clone());
        Ok(())
    }

    fn add_channel(
        &mut self,
        index: u8,
        frequency: u32,
        dr_min: u8,
        dr_max: u8,
    ) -> Result<(), Self::Error> {
        self.added_channels.push((index, frequency, dr_min, dr_max));
        Ok(())
    }

    fn remove_channel(&mut self, index: u8) -> Result<(), Self::Error> {
        self.removed_channels.push(index);
        Ok(())
    }

    fn join(
        &mut self,
        keys: &ActivationKeys,
        _timeout_ms: u32,
        _data_rate: u8,
    ) -> Result<(), JoinError<Self::Error>> {
        self.join_calls += 1;
        self.last_join_keys = Some(keys.clone());
        let accept = match self.join_behavior {
            JoinBehavior::Accept => true,
            JoinBehavior::Timeout => false,
            JoinBehavior::AcceptThenTimeout => self.join_calls == 1,
        };
        if accept {
            self.joined = true;
            Ok(())
        } else {
            Err(JoinError::Timeout)
        }
    }

    fn has_joined(&self) -> bool {
        self.joined
    }

    fn send(&mut self, payload: &[u8], confirmed: bool) -> Result<(), Self::Error> {
        self.sent.push((payload.to_vec(), confirmed));
        Ok(())
    }

    fn events(&mut self) -> RadioEvents {
        self.events.pop_front().unwrap_or(RadioEvents::empty())
    }

    fn recv(&mut self, buf: &mut [u8]) -> Result<(usize, u8), Self::Error> {
        match self.rx_frame.take() {
            Some((payload, port)) => {
                let len = payload.len().min(buf.len());
                buf[..len].copy_from_slice(&payload[..len]);
                Ok((len, port))
            }
            None => Ok((0, 0)),
        }
    }

    fn stats(&self) -> TxStats {
        self.stats
    }
}

/// Mock non-volatile store
pub struct MockStore {
    pub blob: Option<Vec<u8>>,
    pub boot_reason: BootReason,
    /// 1-based save-call indices that fail
    pub fail_on_saves: Vec<u32>,
    pub save_calls: u32,
    pub erase_calls: u32,
}

impl MockStore {
    /// Empty store on a cold boot
    pub fn cold() -> Self {
        Self {
            blob: None,
            boot_reason: BootReason::ColdBoot,
            fail_on_saves: Vec::new(),
            save_calls: 0,
            erase_calls: 0,
        }
    }

    /// Store holding `blob`, waking from deep sleep
    pub fn waking_with(blob: Vec<u8>) -> Self {
        Self {
            blob: Some(blob),
            boot_reason: BootReason::DeepSleepWake,
            fail_on_saves: Vec::new(),
            save_calls: 0,
            erase_calls: 0,
        }
    }
}

impl NonVolatileStore for MockStore {
    type Error = MockError;

    fn save(&mut self, blob: &[u8]) -> Result<(), Self::Error> {
        self.save_calls += 1;
        if self.fail_on_saves.contains(&self.save_calls) {
            return Err(MockError::Error);
        }
        self.blob = Some(blob.to_vec());
        Ok(())
    }

    fn load(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        match &self.blob {
            Some(blob) => {
                let len = blob.len().min(buf.len());
                buf[..len].copy_from_slice(&blob[..len]);
                Ok(len)
            }
            None => Ok(0),
        }
    }

    fn erase(&mut self) -> Result<(), Self::Error> {
        self.erase_calls += 1;
        self.blob = None;
        Ok(())
    }

    fn boot_reason(&self) -> BootReason {
        self.boot_reason
    }
}

/// Mock sleep primitive recording suspend requests
#[derive(Default)]
pub struct MockSleep {
    pub suspends: Vec<u32>,
}

impl SleepControl for MockSleep {
    fn suspend_for(&mut self, duration_ms: u32) {
        self.suspends.push(duration_ms);
    }
}

/// Mock status LED recording displayed patterns
#[derive(Default)]
pub struct MockStatus {
    pub patterns: Vec<LedPattern>,
}

impl StatusSignal for MockStatus {
    fn signal(&mut self, pattern: LedPattern) {
        self.patterns.push(pattern);
    }
}

/// Deterministic LCG for channel-hopping tests
pub struct StepRng {
    state: u32,
}

impl StepRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }
}

impl RngCore for StepRng {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    fn next_u64(&mut self) -> u64 {
        ((self.next_u32() as u64) << 32) | self.next_u32() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Initialize test logging once
pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}
