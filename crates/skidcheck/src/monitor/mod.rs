//! Protocol monitors.
//!
//! Every watcher on a channel implements [`Monitor`] and is stepped once per cycle, at the
//! sample point, by the orchestrator. A watcher can only be stopped between two samples, so
//! its state is never observed half-updated. This module provides:
//! 1. **Data stability:** payload holds while stalled.
//! 2. **Valid stability:** valid is not withdrawn while stalled.
//! 3. **Transaction capture:** the sole writer of a channel's scoreboard.

/// Transaction capture into a scoreboard.
pub mod capture;
/// Payload-holds-while-stalled checker.
pub mod data_stability;
/// No-retraction-of-valid checker.
pub mod valid_stability;

pub use capture::TransactionCapture;
pub use data_stability::DataStabilityMonitor;
pub use valid_stability::{ValidState, ValidStabilityMonitor};

use crate::common::{ChannelId, ChannelSample, VerifyError};

/// A per-cycle observer of one channel.
pub trait Monitor {
    /// Short name used in logs.
    fn name(&self) -> &'static str;
    /// The channel this monitor watches.
    fn channel(&self) -> ChannelId;
    /// Observes one sample; an error is a hard failure that ends the run.
    ///
    /// # Errors
    ///
    /// Returns the protocol violation detected on this cycle, if any.
    fn sample(&mut self, cycle: u64, sample: &ChannelSample) -> Result<(), VerifyError>;
}
