//! Failure definitions for a verification run.
//!
//! This module defines every way a run can fail. It provides:
//! 1. **Protocol Violations:** Raised by a monitor on the cycle they occur; they end the run.
//! 2. **Integrity Violations:** Raised by the comparator once all data has been collected.
//! 3. **Liveness Failures:** Bounded waits that expired instead of hanging the run.
//! 4. **Configuration Errors:** Invalid or unreadable run configuration.

use std::io;

use serde::Serialize;
use thiserror::Error;

use super::signal::ChannelId;
use crate::stimulus::Pattern;

/// Coarse classification of a [`VerifyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// The handshake contract was broken on some cycle.
    Protocol,
    /// Data was lost, duplicated, reordered or corrupted.
    Integrity,
    /// A bounded wait expired.
    Liveness,
    /// A component wrote a signal it does not own.
    Misuse,
}

/// Terminal failure of a verification run. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerifyError {
    /// `data` changed while `valid` was asserted and `ready` deasserted.
    #[error(
        "{channel} data changed from {previous:#x} to {current:#x} while valid is asserted and ready is not (cycle {cycle})"
    )]
    DataUnstable {
        /// Offending channel.
        channel: ChannelId,
        /// Cycle on which the change was sampled.
        cycle: u64,
        /// Value held since the stall began.
        previous: u64,
        /// Value sampled on this cycle.
        current: u64,
    },

    /// `valid` was withdrawn before `ready` resolved a stall.
    #[error("{channel} valid retracted while stalled (ready low), held data {held:#x} (cycle {cycle})")]
    ValidRetracted {
        /// Offending channel.
        channel: ChannelId,
        /// Cycle on which valid was sampled low.
        cycle: u64,
        /// Data that was being offered when the stall began.
        held: u64,
    },

    /// A channel reported `valid` right after reset release.
    #[error("{channel} valid asserted immediately after reset release (cycle {cycle})")]
    ResetNotCleared {
        /// Offending channel.
        channel: ChannelId,
        /// Cycle of the post-reset sample.
        cycle: u64,
    },

    /// The two scoreboards hold a different number of transactions.
    #[error("scoreboard length mismatch: input recorded {input}, output recorded {output}")]
    LengthMismatch {
        /// Transactions seen on the input channel.
        input: usize,
        /// Transactions seen on the output channel.
        output: usize,
    },

    /// The two scoreboards diverge at `index`.
    #[error("scoreboard mismatch at index {index}: input {input:#x}, output {output:#x}")]
    DataMismatch {
        /// First divergent sequence index.
        index: u64,
        /// Value sent on the input channel.
        input: u64,
        /// Value received on the output channel.
        output: u64,
    },

    /// An item was never accepted by the DUT.
    #[error("{phase} item {item} not accepted after {waited} cycles (cycle {cycle})")]
    HandshakeTimeout {
        /// Traffic pattern in effect.
        phase: Pattern,
        /// Index of the item within its phase.
        item: usize,
        /// Cycles the item has been pending.
        waited: u64,
        /// Cycle on which the bound expired.
        cycle: u64,
    },

    /// Stimulus did not finish within the run watchdog.
    #[error("run exceeded {cycles} stimulus cycles without completing")]
    RunTimeout {
        /// The configured bound.
        cycles: u64,
    },

    /// An edge was awaited on a clock that is not running.
    #[error("clock stopped while waiting for an edge (cycle {cycle})")]
    ClockStopped {
        /// Last completed cycle.
        cycle: u64,
    },

    /// A write was attempted on a signal driven by someone else.
    #[error("signal {signal} is not driven by this component")]
    NotSignalOwner {
        /// DUT signal name.
        signal: &'static str,
    },
}

impl VerifyError {
    /// Returns the failure class used when reporting this error.
    pub const fn class(&self) -> FailureClass {
        match self {
            Self::DataUnstable { .. } | Self::ValidRetracted { .. } | Self::ResetNotCleared { .. } => {
                FailureClass::Protocol
            }
            Self::LengthMismatch { .. } | Self::DataMismatch { .. } => FailureClass::Integrity,
            Self::HandshakeTimeout { .. } | Self::RunTimeout { .. } | Self::ClockStopped { .. } => {
                FailureClass::Liveness
            }
            Self::NotSignalOwner { .. } => FailureClass::Misuse,
        }
    }
}

/// Errors raised while loading or validating a [`Config`](crate::config::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),

    /// The configuration is not valid JSON for [`Config`](crate::config::Config).
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value outside its legal range.
    #[error("invalid configuration: {field} {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
