//! Outcome of a verification run.

use std::fmt::Write as _;

use serde::Serialize;

use crate::common::{FailureClass, VerifyError};
use crate::scoreboard::Scoreboard;
use crate::stats::RunStats;

/// Why the run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunEnd {
    /// The stimulus script finished; the comparator ran.
    StimulusComplete,
    /// A hard failure stopped the run before the script finished; the comparator did not run.
    Aborted,
}

/// Result of one run: pass/fail, diagnostics, statistics and both scoreboards.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Configuration label.
    pub name: String,
    /// Stimulus seed, for reproducing the run.
    pub seed: u64,
    /// Payload width in bits.
    pub data_width: u32,
    /// Why the run stopped.
    pub end: RunEnd,
    /// The failure, if any.
    pub failure: Option<VerifyError>,
    /// Transactions matched by the comparator.
    pub matched: usize,
    /// Traffic statistics.
    pub stats: RunStats,
    /// Transfers observed on the input channel.
    pub input: Scoreboard,
    /// Transfers observed on the output channel.
    pub output: Scoreboard,
}

impl RunReport {
    /// Whether the run passed every check.
    pub const fn passed(&self) -> bool {
        self.failure.is_none()
    }

    /// Class of the failure, if any.
    pub fn failure_class(&self) -> Option<FailureClass> {
        self.failure.as_ref().map(VerifyError::class)
    }

    /// Human-readable summary of the run.
    pub fn diagnostics(&self) -> String {
        let mut out = String::new();
        let verdict = if self.passed() { "PASS" } else { "FAIL" };
        let _ = writeln!(
            out,
            "[{verdict}] {} (width {}, seed {:#x})",
            self.name, self.data_width, self.seed
        );
        let _ = writeln!(
            out,
            "scoreboards: input {} / output {}, matched {}",
            self.input.len(),
            self.output.len(),
            self.matched
        );
        if let Some(err) = &self.failure {
            let class = match err.class() {
                FailureClass::Protocol => "protocol violation",
                FailureClass::Integrity => "data integrity violation",
                FailureClass::Liveness => "liveness failure",
                FailureClass::Misuse => "testbench misuse",
            };
            let _ = writeln!(out, "{class}: {err}");
        }
        out.push_str(&self.stats.to_string());
        out
    }

    /// Serializes the report, scoreboards included.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
