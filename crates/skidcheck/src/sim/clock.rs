//! Two-phase clock generator.
//!
//! The clock starts low at time zero. Each call to [`ClockSource::next_edge`] advances
//! simulated time by one half-period and toggles the level, so the first edge is rising.

use std::fmt;

use super::dut::DutHandle;
use crate::common::VerifyError;
use crate::config::{ClockConfig, TimeUnit};

/// A clock transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEdge {
    /// Low to high; registers in the DUT update here.
    Rising,
    /// High to low; the sample point for monitors and scoreboards.
    Falling,
}

impl fmt::Display for ClockEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rising => f.write_str("rising"),
            Self::Falling => f.write_str("falling"),
        }
    }
}

/// Periodic clock with a configurable half-period and time unit.
#[derive(Debug, Clone)]
pub struct ClockSource {
    half_period: u64,
    unit: TimeUnit,
    level: bool,
    now: u64,
    cycles: u64,
    running: bool,
}

impl ClockSource {
    /// Creates a stopped clock.
    pub const fn new(half_period: u64, unit: TimeUnit) -> Self {
        Self {
            half_period,
            unit,
            level: false,
            now: 0,
            cycles: 0,
            running: false,
        }
    }

    /// Creates a stopped clock from run configuration.
    pub const fn from_config(config: &ClockConfig) -> Self {
        Self::new(config.half_period(), config.unit)
    }

    /// Starts (or resumes) edge generation.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stops edge generation; time and level are frozen.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether edges are being generated.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Advances to the next edge, or returns `None` if the clock is stopped.
    pub fn next_edge(&mut self) -> Option<ClockEdge> {
        if !self.running {
            return None;
        }
        self.now += self.half_period;
        self.level = !self.level;
        if self.level {
            self.cycles += 1;
            Some(ClockEdge::Rising)
        } else {
            Some(ClockEdge::Falling)
        }
    }

    /// Advances until `edge`, delivering every edge on the way to `dut`.
    ///
    /// This is the only suspension point of a run: everything a component does between two
    /// calls happens at one instant of simulated time.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::ClockStopped`] if the clock is not running.
    ///
    /// # Returns
    ///
    /// The rising-edge count after the wait.
    pub fn wait_edge<D: DutHandle + ?Sized>(
        &mut self,
        dut: &mut D,
        edge: ClockEdge,
    ) -> Result<u64, VerifyError> {
        loop {
            let Some(next) = self.next_edge() else {
                return Err(VerifyError::ClockStopped { cycle: self.cycles });
            };
            dut.clock_edge(next);
            if next == edge {
                return Ok(self.cycles);
            }
        }
    }

    /// Current level of `clk`.
    pub const fn level(&self) -> bool {
        self.level
    }

    /// Simulated time in [`ClockSource::unit`]s.
    pub const fn now(&self) -> u64 {
        self.now
    }

    /// Time unit of [`ClockSource::now`].
    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Number of rising edges generated so far.
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }
}
