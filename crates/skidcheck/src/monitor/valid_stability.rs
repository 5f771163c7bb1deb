//! Valid stability checker.

use tracing::error;

use super::Monitor;
use crate::common::{ChannelId, ChannelSample, VerifyError};

/// Handshake state tracked by [`ValidStabilityMonitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidState {
    /// No stall outstanding.
    #[default]
    Idle,
    /// `valid` was high with `ready` low on the previous sample.
    Asserted,
}

/// Flags `valid` falling before `ready` resolved a stall.
///
/// `Idle -> Asserted` on valid=1, ready=0; `Asserted -> Idle` once ready=1; valid=0 while
/// `Asserted` is a violation.
#[derive(Debug, Clone)]
pub struct ValidStabilityMonitor {
    channel: ChannelId,
    state: ValidState,
    held: u64,
}

impl ValidStabilityMonitor {
    /// Creates a monitor in [`ValidState::Idle`].
    pub const fn new(channel: ChannelId) -> Self {
        Self {
            channel,
            state: ValidState::Idle,
            held: 0,
        }
    }

    /// Current state.
    pub const fn state(&self) -> ValidState {
        self.state
    }
}

impl Monitor for ValidStabilityMonitor {
    fn name(&self) -> &'static str {
        "valid-stability"
    }

    fn channel(&self) -> ChannelId {
        self.channel
    }

    fn sample(&mut self, cycle: u64, sample: &ChannelSample) -> Result<(), VerifyError> {
        if self.state == ValidState::Asserted && !sample.valid {
            let err = VerifyError::ValidRetracted {
                channel: self.channel,
                cycle,
                held: self.held,
            };
            error!(channel = %self.channel, cycle, "{err}");
            return Err(err);
        }

        self.state = if sample.stalled() {
            if self.state == ValidState::Idle {
                self.held = sample.data;
            }
            ValidState::Asserted
        } else {
            ValidState::Idle
        };
        Ok(())
    }
}
