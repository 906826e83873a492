//! Radio channel plan
//!
//! Single-channel gateways only decode one frequency. Enabling more channels
//! does not improve throughput but does risk a join request or uplink
//! landing on a channel the paired gateway never listens on, which fails
//! silently rather than with an error. The plan therefore pins the three
//! default channel slots to the configured frequency (or to hopping
//! candidates) and disables every other slot, before the join request goes
//! out.

use heapless::Vec;
use rand_core::RngCore;

use crate::radio::traits::Radio;

/// Channel slots the plan enables (indices `0..ENABLED_CHANNELS`)
pub const ENABLED_CHANNELS: usize = 3;
/// Channel slots the radio exposes; indices
/// `ENABLED_CHANNELS..MAX_CHANNELS` are disabled on apply
pub const MAX_CHANNELS: usize = 16;
/// Minimum data rate allowed on an enabled channel
pub const CHANNEL_DR_MIN: u8 = 0;
/// Maximum data rate allowed on an enabled channel
pub const CHANNEL_DR_MAX: u8 = 5;

/// One enabled channel entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    /// Slot index (0..=2)
    pub index: u8,
    /// Center frequency in Hz
    pub frequency: u32,
    /// Minimum data rate
    pub dr_min: u8,
    /// Maximum data rate
    pub dr_max: u8,
}

/// Channel plan construction error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelPlanError {
    /// Hopping requested with an empty candidate set
    NoCandidates,
}

/// The set of channels enabled on the radio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPlan {
    channels: Vec<Channel, ENABLED_CHANNELS>,
}

impl ChannelPlan {
    /// Plan with all three slots on one frequency, matching a fixed
    /// single-channel gateway
    pub fn single(frequency: u32) -> Self {
        let mut channels = Vec::new();
        for index in 0..ENABLED_CHANNELS as u8 {
            // capacity is ENABLED_CHANNELS, pushes cannot fail
            let _ = channels.push(Channel {
                index,
                frequency,
                dr_min: CHANNEL_DR_MIN,
                dr_max: CHANNEL_DR_MAX,
            });
        }
        Self { channels }
    }

    /// Plan with each slot's frequency drawn uniformly from `candidates`.
    ///
    /// The pick is a coarse collision-avoidance heuristic between nodes, not
    /// a fair or cryptographic selection.
    pub fn hopping<G: RngCore>(candidates: &[u32], rng: &mut G) -> Result<Self, ChannelPlanError> {
        if candidates.is_empty() {
            return Err(ChannelPlanError::NoCandidates);
        }
        let mut channels = Vec::new();
        for index in 0..ENABLED_CHANNELS as u8 {
            let frequency = candidates[rng.next_u32() as usize % candidates.len()];
            let _ = channels.push(Channel {
                index,
                frequency,
                dr_min: CHANNEL_DR_MIN,
                dr_max: CHANNEL_DR_MAX,
            });
        }
        Ok(Self { channels })
    }

    /// The enabled channel entries
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Program the plan into the radio: enable slots 0..=2, disable all
    /// remaining slots.
    ///
    /// Must run before the join request is sent.
    pub fn apply<R: Radio>(&self, radio: &mut R) -> Result<(), R::Error> {
        for ch in self.channels.iter() {
            radio.add_channel(ch.index, ch.frequency, ch.dr_min, ch.dr_max)?;
        }
        for index in ENABLED_CHANNELS as u8..MAX_CHANNELS as u8 {
            radio.remove_channel(index)?;
        }
        Ok(())
    }
}
