//! Randomized stimulus driver.
//!
//! The driver is stepped twice per cycle by the orchestrator:
//! 1. [`StimulusDriver::drive`] right after the rising edge writes `in_valid`, `in_data` and
//!    `out_ready` for the new cycle.
//! 2. [`StimulusDriver::observe`] at the sample point sees the settled input channel and decides
//!    whether the pending item was accepted.
//!
//! An item is offered until a sample shows valid and ready both high, with its data held the
//! whole time, so the driver itself never breaks the stability rules it is used to check.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use tracing::{info, trace};

use super::Pattern;
use crate::common::{ChannelSample, ConfigError, VerifyError, payload_mask};
use crate::config::{Config, RunConfig, check_probability};
use crate::sim::dut::{ChannelView, DutHandle};

/// An item waiting for its handshake.
#[derive(Debug, Clone, Copy)]
struct Pending {
    value: u64,
    /// Valid has been driven high for this item at least once.
    offered: bool,
    /// Cycles offered without acceptance.
    waited: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Valid low for `remaining` cycles, then phase `next`.
    Quiescent { next: usize, remaining: u32 },
    Active { phase: usize, sent: usize },
    /// Downstream ready held high so in-flight items reach the output.
    Drain { remaining: u32 },
    Done,
}

/// Reference sender for the input channel.
#[derive(Debug, Clone)]
pub struct StimulusDriver {
    input: ChannelView,
    sink: ChannelView,
    item_count: usize,
    patterns: Vec<Pattern>,
    rng: Xoshiro256StarStar,
    ready_probability: f64,
    valid_probability: f64,
    quiescent_cycles: u32,
    drain_cycles: u32,
    handshake_timeout: u64,
    stage: Stage,
    pending: Option<Pending>,
    sent_total: usize,
}

impl StimulusDriver {
    /// Creates a driver sending `item_count` random payloads per pattern, in order, on `input`.
    ///
    /// Payloads are drawn from `[0, 2^width)` where `width` is the channel width. Remaining
    /// settings take their defaults and can be changed with the `with_*` methods.
    pub fn new(input: ChannelView, item_count: usize, patterns: &[Pattern]) -> Self {
        let defaults = RunConfig::default();
        let mut driver = Self {
            input,
            sink: ChannelView::output(input.width()),
            item_count,
            patterns: patterns.to_vec(),
            rng: Xoshiro256StarStar::seed_from_u64(defaults.seed),
            ready_probability: defaults.ready_probability,
            valid_probability: defaults.valid_probability,
            quiescent_cycles: defaults.quiescent_cycles,
            drain_cycles: defaults.drain_cycles,
            handshake_timeout: defaults.handshake_timeout,
            stage: Stage::Done,
            pending: None,
            sent_total: 0,
        };
        driver.rewind();
        driver
    }

    /// Creates a driver from a full run configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `config` fails [`Config::validate`].
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let run = &config.run;
        Ok(Self::new(
            ChannelView::input(config.dut.data_width),
            run.item_count,
            &run.patterns,
        )
        .with_seed(run.seed)
        .with_probabilities(run.ready_probability, run.valid_probability)?
        .with_quiescent_cycles(run.quiescent_cycles)
        .with_drain_cycles(run.drain_cycles)
        .with_handshake_timeout(run.handshake_timeout))
    }

    /// Reseeds the payload and timing generator.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Xoshiro256StarStar::seed_from_u64(seed);
        self
    }

    /// Sets the per-cycle probabilities of downstream ready and of offering a gated item.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] unless both lie in `(0, 1]`.
    pub fn with_probabilities(mut self, ready: f64, valid: f64) -> Result<Self, ConfigError> {
        check_probability("run.ready_probability", ready)?;
        check_probability("run.valid_probability", valid)?;
        self.ready_probability = ready;
        self.valid_probability = valid;
        Ok(self)
    }

    /// Sets the idle window before the first phase and between phases.
    #[must_use]
    pub fn with_quiescent_cycles(mut self, cycles: u32) -> Self {
        self.quiescent_cycles = cycles;
        self.rewind();
        self
    }

    /// Sets the drain window after the last phase.
    #[must_use]
    pub fn with_drain_cycles(mut self, cycles: u32) -> Self {
        self.drain_cycles = cycles;
        self.rewind();
        self
    }

    /// Sets the bound on cycles an offered item may wait for `in_ready`.
    #[must_use]
    pub fn with_handshake_timeout(mut self, cycles: u64) -> Self {
        self.handshake_timeout = cycles;
        self
    }

    /// Drives the pre-reset idle values: valid and data low, downstream ready low.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::NotSignalOwner`] if the driver was built on the output channel.
    pub fn idle<D: DutHandle + ?Sized>(&mut self, dut: &mut D) -> Result<(), VerifyError> {
        self.input.drive(dut, false, 0)?;
        self.sink.set_ready(dut, false)
    }

    /// Writes this cycle's `in_valid`, `in_data` and `out_ready`.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::NotSignalOwner`] if the driver was built on the output channel.
    pub fn drive<D: DutHandle + ?Sized>(&mut self, dut: &mut D) -> Result<(), VerifyError> {
        let Stage::Active { phase, .. } = self.stage else {
            self.input.drive(dut, false, 0)?;
            return self.sink.set_ready(dut, true);
        };
        let pattern = self.patterns[phase];

        let mut pending = match self.pending {
            Some(p) => p,
            None => Pending {
                value: self.rng.gen_range(0..=payload_mask(self.input.width())),
                offered: false,
                waited: 0,
            },
        };
        let valid = pending.offered
            || !pattern.gates_valid()
            || self.rng.gen_bool(self.valid_probability);
        pending.offered |= valid;
        self.pending = Some(pending);

        let ready = !pattern.random_ready() || self.rng.gen_bool(self.ready_probability);
        trace!(%pattern, valid, ready, "drive {:#x}", pending.value);

        self.input.drive(dut, valid, pending.value)?;
        self.sink.set_ready(dut, ready)
    }

    /// Observes the settled input channel at the sample point and advances the script.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::HandshakeTimeout`] once the pending item has been offered without
    /// acceptance for longer than the handshake bound. Cycles spent before the item is first
    /// offered (random valid gating) do not count.
    pub fn observe(&mut self, cycle: u64, input: &ChannelSample) -> Result<(), VerifyError> {
        match self.stage {
            Stage::Quiescent { next, remaining } => {
                if remaining <= 1 {
                    self.start_phase(next, cycle);
                } else {
                    self.stage = Stage::Quiescent {
                        next,
                        remaining: remaining - 1,
                    };
                }
            }
            Stage::Active { phase, sent } => {
                let Some(mut pending) = self.pending else {
                    return Ok(());
                };
                if input.fires() {
                    self.pending = None;
                    self.sent_total += 1;
                    if sent + 1 == self.item_count {
                        self.finish_phase(phase, cycle);
                    } else {
                        self.stage = Stage::Active {
                            phase,
                            sent: sent + 1,
                        };
                    }
                } else if pending.offered {
                    pending.waited += 1;
                    if pending.waited > self.handshake_timeout {
                        return Err(VerifyError::HandshakeTimeout {
                            phase: self.patterns[phase],
                            item: sent,
                            waited: pending.waited,
                            cycle,
                        });
                    }
                    self.pending = Some(pending);
                }
            }
            Stage::Drain { remaining } => {
                self.stage = if remaining <= 1 {
                    info!(cycle, sent = self.sent_total, "stimulus complete");
                    Stage::Done
                } else {
                    Stage::Drain {
                        remaining: remaining - 1,
                    }
                };
            }
            Stage::Done => {}
        }
        Ok(())
    }

    /// Whether every phase and the drain window have completed.
    pub fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }

    /// Pattern of the phase in progress, if any.
    pub fn current_pattern(&self) -> Option<Pattern> {
        match self.stage {
            Stage::Active { phase, .. } => Some(self.patterns[phase]),
            _ => None,
        }
    }

    /// Items accepted by the DUT so far, across all phases.
    pub const fn items_sent(&self) -> usize {
        self.sent_total
    }

    /// Items the full script will send.
    pub fn items_total(&self) -> usize {
        self.item_count * self.patterns.len()
    }

    fn rewind(&mut self) {
        self.pending = None;
        self.sent_total = 0;
        if self.quiescent_cycles == 0 {
            self.start_phase(0, 0);
        } else {
            self.stage = Stage::Quiescent {
                next: 0,
                remaining: self.quiescent_cycles,
            };
        }
    }

    fn start_phase(&mut self, phase: usize, cycle: u64) {
        if phase >= self.patterns.len() || self.item_count == 0 {
            self.stage = if self.drain_cycles == 0 {
                Stage::Done
            } else {
                Stage::Drain {
                    remaining: self.drain_cycles,
                }
            };
            return;
        }
        info!(
            cycle,
            pattern = %self.patterns[phase],
            items = self.item_count,
            "phase start"
        );
        self.stage = Stage::Active { phase, sent: 0 };
    }

    fn finish_phase(&mut self, phase: usize, cycle: u64) {
        info!(cycle, pattern = %self.patterns[phase], "phase complete");
        let next = phase + 1;
        if next < self.patterns.len() && self.quiescent_cycles > 0 {
            self.stage = Stage::Quiescent {
                next,
                remaining: self.quiescent_cycles,
            };
        } else {
            self.start_phase(next, cycle);
        }
    }
}
