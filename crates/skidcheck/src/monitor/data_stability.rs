//! Data stability checker.
//!
//! While `valid` is high and `ready` is low, the sender must keep `data` unchanged until the
//! cycle on which `ready` rises.

use tracing::error;

use super::Monitor;
use crate::common::{ChannelId, ChannelSample, VerifyError};

/// Flags any change of `data` on the cycle after a stall.
#[derive(Debug, Clone)]
pub struct DataStabilityMonitor {
    channel: ChannelId,
    stalled: bool,
    held: u64,
}

impl DataStabilityMonitor {
    /// Creates a monitor in the not-stalled state.
    pub const fn new(channel: ChannelId) -> Self {
        Self {
            channel,
            stalled: false,
            held: 0,
        }
    }

    /// Whether the previous sample was a stall.
    pub const fn stalled(&self) -> bool {
        self.stalled
    }

    /// Data captured when the current stall began.
    pub const fn held(&self) -> Option<u64> {
        if self.stalled { Some(self.held) } else { None }
    }
}

impl Monitor for DataStabilityMonitor {
    fn name(&self) -> &'static str {
        "data-stability"
    }

    fn channel(&self) -> ChannelId {
        self.channel
    }

    fn sample(&mut self, cycle: u64, sample: &ChannelSample) -> Result<(), VerifyError> {
        if self.stalled && sample.data != self.held {
            let err = VerifyError::DataUnstable {
                channel: self.channel,
                cycle,
                previous: self.held,
                current: sample.data,
            };
            error!(channel = %self.channel, cycle, "{err}");
            return Err(err);
        }

        let entering = sample.stalled() && !self.stalled;
        self.stalled = sample.stalled();
        if entering {
            self.held = sample.data;
        }
        Ok(())
    }
}
