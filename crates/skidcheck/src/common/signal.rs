//! Channel identifiers and sampled signal values.

use std::fmt;

use serde::Serialize;

/// One direction of traffic through the device under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelId {
    /// Upstream side: `in_valid`, `in_ready`, `in_data`.
    Input,
    /// Downstream side: `out_valid`, `out_ready`, `out_data`.
    Output,
}

impl ChannelId {
    /// Signal name prefix used on the DUT surface (`"in"` or `"out"`).
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Input => "in",
            Self::Output => "out",
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// Snapshot of one channel's wires taken at the sample point of a cycle.
///
/// Monitors and scoreboards only ever see samples, never the DUT itself,
/// so they cannot write a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelSample {
    /// Sender has data present.
    pub valid: bool,
    /// Receiver can accept.
    pub ready: bool,
    /// Payload, already masked to the channel width.
    pub data: u64,
}

impl ChannelSample {
    /// Creates a sample from raw wire values.
    pub const fn new(valid: bool, ready: bool, data: u64) -> Self {
        Self { valid, ready, data }
    }

    /// A transfer completes on this cycle.
    #[inline]
    pub const fn fires(&self) -> bool {
        self.valid && self.ready
    }

    /// The sender is blocked by backpressure on this cycle.
    #[inline]
    pub const fn stalled(&self) -> bool {
        self.valid && !self.ready
    }
}

/// Returns the all-ones mask for a payload of `width` bits (1..=64).
#[inline]
pub const fn payload_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Truncates `value` to `width` bits.
#[inline]
pub const fn mask(value: u64, width: u32) -> u64 {
    value & payload_mask(width)
}
