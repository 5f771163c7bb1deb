//! Run statistics collection and reporting.
//!
//! This module tracks traffic metrics for a verification run. It provides:
//! 1. **Cycles:** Total, reset and stimulus cycle counts and simulated end time.
//! 2. **Channel activity:** Transfers, stalls, idle cycles and ready-without-valid cycles.
//! 3. **Throughput:** Transfers per stimulus cycle for each channel.

use std::fmt;

use serde::Serialize;

use crate::common::ChannelSample;

/// Per-channel cycle classification.
///
/// Every sampled cycle lands in exactly one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChannelStats {
    /// Cycles with valid and ready high.
    pub transfers: u64,
    /// Cycles with valid high and ready low.
    pub stalls: u64,
    /// Cycles with valid and ready low.
    pub idle: u64,
    /// Cycles with ready high and valid low.
    pub ready_only: u64,
}

impl ChannelStats {
    /// Classifies one sample.
    pub fn record(&mut self, sample: &ChannelSample) {
        match (sample.valid, sample.ready) {
            (true, true) => self.transfers += 1,
            (true, false) => self.stalls += 1,
            (false, true) => self.ready_only += 1,
            (false, false) => self.idle += 1,
        }
    }

    /// Number of samples recorded.
    pub const fn samples(&self) -> u64 {
        self.transfers + self.stalls + self.idle + self.ready_only
    }

    /// Transfers per sampled cycle (0.0 if nothing was sampled).
    pub fn throughput(&self) -> f64 {
        let samples = self.samples();
        if samples == 0 {
            0.0
        } else {
            self.transfers as f64 / samples as f64
        }
    }
}

/// Statistics for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    /// Rising edges delivered, reset included.
    pub cycles: u64,
    /// Rising edges spent with reset asserted.
    pub reset_cycles: u64,
    /// Cycles sampled by the watchers.
    pub stimulus_cycles: u64,
    /// Simulated time at the end of the run.
    pub end_time: u64,
    /// Time unit of `end_time`.
    pub time_unit: String,
    /// Input channel activity.
    pub input: ChannelStats,
    /// Output channel activity.
    pub output: ChannelStats,
}

impl RunStats {
    /// Records both channels for one stimulus cycle.
    pub fn record(&mut self, input: &ChannelSample, output: &ChannelSample) {
        self.stimulus_cycles += 1;
        self.input.record(input);
        self.output.record(output);
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "cycles {} (reset {}, stimulus {}), ended at {} {}",
            self.cycles, self.reset_cycles, self.stimulus_cycles, self.end_time, self.time_unit
        )?;
        for (name, ch) in [("input", &self.input), ("output", &self.output)] {
            writeln!(
                f,
                "  {name:<6} transfers {:>6}  stalls {:>6}  idle {:>6}  ready-only {:>6}  throughput {:.3}",
                ch.transfers,
                ch.stalls,
                ch.idle,
                ch.ready_only,
                ch.throughput()
            )?;
        }
        Ok(())
    }
}
