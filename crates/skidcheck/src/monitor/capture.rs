//! Transaction capture.

use tracing::debug;

use super::Monitor;
use crate::common::{ChannelId, ChannelSample, VerifyError};
use crate::scoreboard::Scoreboard;

/// Appends one [`Transaction`](crate::scoreboard::Transaction) per sample with valid and
/// ready both high. This is the only writer of its scoreboard.
#[derive(Debug, Clone)]
pub struct TransactionCapture {
    scoreboard: Scoreboard,
}

impl TransactionCapture {
    /// Takes ownership of an (empty) scoreboard for the duration of the run.
    pub const fn new(scoreboard: Scoreboard) -> Self {
        Self { scoreboard }
    }

    /// Read access while the run is in progress.
    pub const fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Stops capturing and returns the scoreboard.
    pub fn into_scoreboard(self) -> Scoreboard {
        self.scoreboard
    }
}

impl Monitor for TransactionCapture {
    fn name(&self) -> &'static str {
        "capture"
    }

    fn channel(&self) -> ChannelId {
        self.scoreboard.channel()
    }

    fn sample(&mut self, cycle: u64, sample: &ChannelSample) -> Result<(), VerifyError> {
        if sample.fires() {
            let txn = self.scoreboard.record(sample.data, cycle);
            debug!(
                channel = %self.scoreboard.channel(),
                index = txn.index,
                cycle,
                "transfer {:#x}",
                txn.value
            );
        }
        Ok(())
    }
}
