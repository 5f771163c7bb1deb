//! Run orchestrator: owns the timeline and every component for one run.
//!
//! Each stimulus cycle follows the same schedule:
//! 1. The driver writes the input channel and downstream ready (start of cycle).
//! 2. The falling edge is delivered; the DUT has settled.
//! 3. Both channels are sampled once; every watcher and the driver see the same samples.
//! 4. The rising edge is delivered and the DUT's registers update.
//!
//! Watchers are plain values stepped by this loop, so stopping them can only happen between
//! two samples.

use tracing::{error, info, trace};

use super::clock::{ClockEdge, ClockSource};
use super::dut::{ChannelView, DutHandle};
use super::report::{RunEnd, RunReport};
use crate::common::{ChannelId, ChannelSample, ConfigError, VerifyError};
use crate::config::Config;
use crate::monitor::{DataStabilityMonitor, Monitor, TransactionCapture, ValidStabilityMonitor};
use crate::scoreboard::{self, Scoreboard};
use crate::stats::RunStats;
use crate::stimulus::StimulusDriver;

/// The watchers attached to one channel.
#[derive(Debug)]
struct ChannelWatch {
    view: ChannelView,
    data: DataStabilityMonitor,
    valid: ValidStabilityMonitor,
    capture: TransactionCapture,
}

impl ChannelWatch {
    fn new(view: ChannelView, scoreboard: Scoreboard) -> Self {
        Self {
            view,
            data: DataStabilityMonitor::new(view.id()),
            valid: ValidStabilityMonitor::new(view.id()),
            capture: TransactionCapture::new(scoreboard),
        }
    }

    fn sample(&mut self, cycle: u64, sample: &ChannelSample) -> Result<(), VerifyError> {
        self.data.sample(cycle, sample)?;
        self.valid.sample(cycle, sample)?;
        self.capture.sample(cycle, sample)
    }

    /// Stops every watcher and hands back the scoreboard.
    fn stop(self) -> Scoreboard {
        self.capture.into_scoreboard()
    }
}

/// Runs one verification of a DUT against a [`Config`].
#[derive(Debug, Clone)]
pub struct Orchestrator {
    config: Config,
    driver: StimulusDriver,
}

impl Orchestrator {
    /// Validates `config` and prepares a run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if any field is out of range.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let driver = StimulusDriver::from_config(&config)?;
        Ok(Self { config, driver })
    }

    /// The validated configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Drives reset, runs the stimulus script with all watchers attached, and reconciles the
    /// scoreboards.
    ///
    /// The DUT is borrowed for the duration of the run only. Every failure, including a
    /// protocol violation in the first cycle, is reported in the returned [`RunReport`].
    pub fn run<D: DutHandle + ?Sized>(&self, dut: &mut D) -> RunReport {
        let config = &self.config;
        let width = config.dut.data_width;
        info!(
            name = %config.name,
            width,
            reg_output = config.dut.reg_output,
            seed = config.run.seed,
            items = config.run.item_count,
            "run start"
        );

        let mut clock = ClockSource::from_config(&config.clock);
        let mut driver = self.driver.clone();
        let mut input = ChannelWatch::new(ChannelView::input(width), Scoreboard::new(ChannelId::Input));
        let mut output =
            ChannelWatch::new(ChannelView::output(width), Scoreboard::new(ChannelId::Output));
        let mut stats = RunStats {
            time_unit: clock.unit().to_string(),
            ..RunStats::default()
        };

        let outcome = self.execute(
            dut,
            &mut clock,
            &mut driver,
            [&mut input, &mut output],
            &mut stats,
        );

        clock.stop();
        let input = input.stop();
        let output = output.stop();
        stats.cycles = clock.cycles();
        stats.end_time = clock.now();

        let (end, failure, matched) = match outcome {
            Ok(()) => match scoreboard::compare(&input, &output) {
                Ok(matched) => (RunEnd::StimulusComplete, None, matched),
                Err(err) => (RunEnd::StimulusComplete, Some(err), 0),
            },
            Err(err) => (RunEnd::Aborted, Some(err), 0),
        };

        match &failure {
            None => info!(name = %config.name, matched, "run passed: all transferred values match"),
            Some(err) => error!(name = %config.name, class = ?err.class(), "run failed: {err}"),
        }

        RunReport {
            name: config.name.clone(),
            seed: config.run.seed,
            data_width: width,
            end,
            failure,
            matched,
            stats,
            input,
            output,
        }
    }

    fn execute<D: DutHandle + ?Sized>(
        &self,
        dut: &mut D,
        clock: &mut ClockSource,
        driver: &mut StimulusDriver,
        [input, output]: [&mut ChannelWatch; 2],
        stats: &mut RunStats,
    ) -> Result<(), VerifyError> {
        let run = &self.config.run;
        clock.start();

        driver.idle(dut)?;
        dut.set_reset(true);
        for _ in 0..run.reset_cycles {
            let _ = clock.wait_edge(dut, ClockEdge::Rising)?;
        }
        stats.reset_cycles = u64::from(run.reset_cycles);
        dut.set_reset(false);
        info!(cycle = clock.cycles(), "reset released");

        // Nothing may be presented before stimulus starts.
        let cycle = clock.wait_edge(dut, ClockEdge::Falling)?;
        for watch in [&*input, &*output] {
            if watch.view.valid(dut) {
                return Err(VerifyError::ResetNotCleared {
                    channel: watch.view.id(),
                    cycle,
                });
            }
        }
        let start = clock.wait_edge(dut, ClockEdge::Rising)?;

        loop {
            let cycle = clock.cycles();
            if cycle - start >= run.max_cycles {
                return Err(VerifyError::RunTimeout {
                    cycles: run.max_cycles,
                });
            }

            driver.drive(dut)?;
            let _ = clock.wait_edge(dut, ClockEdge::Falling)?;

            let in_sample = input.view.sample(dut);
            let out_sample = output.view.sample(dut);
            trace!(cycle, ?in_sample, ?out_sample, "sample");
            stats.record(&in_sample, &out_sample);

            input.sample(cycle, &in_sample)?;
            output.sample(cycle, &out_sample)?;
            driver.observe(cycle, &in_sample)?;

            if driver.is_done() {
                info!(cycle, sent = driver.items_sent(), "stopping watchers");
                return Ok(());
            }
            let _ = clock.wait_edge(dut, ClockEdge::Rising)?;
        }
    }
}
