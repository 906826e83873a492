//! Operator status feedback
//!
//! Maps device lifecycle states to LED patterns. The mapping is purely
//! informational and not part of protocol correctness; the LED driver
//! itself lives behind [`StatusSignal`].

/// Device lifecycle states reported to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusState {
    /// A join is in progress
    Joining,
    /// The network accepted the join
    Joined,
    /// An uplink was submitted to the radio
    Sending,
}

/// A repeated on/off blink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    /// Number of blinks
    pub count: u8,
    /// On-time per blink, in milliseconds
    pub on_ms: u32,
}

/// Color and optional blink for one status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedPattern {
    /// RGB color, `0xRRGGBB`
    pub rgb: u32,
    /// Blink pattern; `None` means solid until the next status
    pub pulse: Option<Pulse>,
}

/// LED pattern for `state`
pub const fn pattern(state: StatusState) -> LedPattern {
    match state {
        StatusState::Joining => LedPattern {
            rgb: 0xff_0000, // red
            pulse: None,
        },
        StatusState::Joined => LedPattern {
            rgb: 0x00_ff00, // green
            pulse: Some(Pulse { count: 1, on_ms: 500 }),
        },
        StatusState::Sending => LedPattern {
            rgb: 0x00_00ff, // blue
            pulse: Some(Pulse { count: 3, on_ms: 100 }),
        },
    }
}

/// Output capability for status patterns
pub trait StatusSignal {
    /// Display `pattern`
    fn signal(&mut self, pattern: LedPattern);
}

/// Status sink for headless deployments
pub struct NoStatus;

impl StatusSignal for NoStatus {
    fn signal(&mut self, _pattern: LedPattern) {}
}
