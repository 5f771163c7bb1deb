//! Configuration for a verification run.
//!
//! This module defines all configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline constants (reset length, clock, stimulus sizes, wait bounds).
//! 2. **Structures:** DUT parameters, clock settings, and stimulus/watchdog settings.
//! 3. **Profiles:** The two canonical DUT builds exercised by the test matrix.
//!
//! Configuration is supplied as JSON (`Config::from_json`, `Config::from_json_file`) or built from
//! `Config::default()` / `Config::for_profile`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;
use crate::stimulus::Pattern;

/// Default configuration constants.
mod defaults {
    /// Payload width used when no profile is selected.
    pub const DATA_WIDTH: u32 = 8;

    /// Rising edges the reset is held for before release.
    pub const RESET_CYCLES: u32 = 3;

    /// Clock period (100 MHz at nanosecond resolution).
    pub const CLOCK_PERIOD: u64 = 10;

    /// Items sent in each traffic phase.
    pub const ITEM_COUNT: usize = 100;

    /// Stimulus seed.
    pub const SEED: u64 = 0x5EED_CAFE;

    /// Idle cycles between traffic phases.
    pub const QUIESCENT_CYCLES: u32 = 2;

    /// Cycles with downstream ready held high after the last phase.
    ///
    /// Must cover the DUT's worst-case fall-through latency.
    pub const DRAIN_CYCLES: u32 = 4;

    /// Cycles an offered item may wait for `in_ready`.
    pub const HANDSHAKE_TIMEOUT: u64 = 1_000;

    /// Stimulus cycles before the run watchdog fires.
    pub const MAX_CYCLES: u64 = 100_000;

    /// Probability of downstream ready per cycle under random backpressure.
    pub const READY_PROBABILITY: f64 = 0.5;

    /// Probability of offering a pending item per cycle under random valid gating.
    pub const VALID_PROBABILITY: f64 = 0.5;
}

/// Time unit of the simulated clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Picoseconds.
    Ps,
    /// Nanoseconds.
    #[default]
    Ns,
    /// Microseconds.
    Us,
    /// Milliseconds.
    Ms,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ps => "ps",
            Self::Ns => "ns",
            Self::Us => "us",
            Self::Ms => "ms",
        };
        f.write_str(s)
    }
}

/// How the DUT's reset input behaves.
///
/// Informational for the checker, which sequences reset identically for both kinds; it is
/// carried in [`DutConfig`] for whatever implements [`DutHandle`](crate::DutHandle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetKind {
    /// `rst`, sampled on the rising edge.
    #[default]
    Sync,
    /// `arst`, effective as soon as it is asserted.
    Async,
}

/// The two canonical DUT builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// `DATA_WIDTH = 1`, unregistered output.
    Small,
    /// `DATA_WIDTH = 32`, registered output.
    Big,
}

impl Profile {
    /// Every profile, in test-matrix order.
    pub const ALL: [Self; 2] = [Self::Small, Self::Big];

    /// DUT parameters for this profile.
    pub const fn dut(self) -> DutConfig {
        match self {
            Self::Small => DutConfig {
                data_width: 1,
                reg_output: false,
                reset: ResetKind::Sync,
            },
            Self::Big => DutConfig {
                data_width: 32,
                reg_output: true,
                reset: ResetKind::Sync,
            },
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Small => f.write_str("small"),
            Self::Big => f.write_str("big"),
        }
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "big" => Ok(Self::Big),
            other => Err(ConfigError::Invalid {
                field: "profile",
                reason: format!("unknown profile {other:?} (expected small or big)"),
            }),
        }
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use skidcheck::config::{Config, TimeUnit};
///
/// let config = Config::default();
/// assert_eq!(config.dut.data_width, 8);
/// assert_eq!(config.clock.unit, TimeUnit::Ns);
/// assert_eq!(config.run.reset_cycles, 3);
/// ```
///
/// Sections and fields may be omitted from JSON; missing ones take their defaults:
///
/// ```
/// use skidcheck::config::Config;
/// use skidcheck::Pattern;
///
/// let json = r#"{
///     "name": "wide",
///     "dut": { "data_width": 32, "reg_output": true },
///     "run": { "item_count": 3, "patterns": ["RandomBackpressure"] }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.dut.data_width, 32);
/// assert_eq!(config.run.item_count, 3);
/// assert_eq!(config.run.patterns, vec![Pattern::RandomBackpressure]);
/// assert_eq!(config.run.quiescent_cycles, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Label carried into the run report.
    pub name: String,
    /// DUT build parameters.
    pub dut: DutConfig,
    /// Clock settings.
    pub clock: ClockConfig,
    /// Stimulus and watchdog settings.
    pub run: RunConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: String::from("default"),
            dut: DutConfig::default(),
            clock: ClockConfig::default(),
            run: RunConfig::default(),
        }
    }
}

impl Config {
    /// Default run settings against one of the canonical DUT builds.
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            name: profile.to_string(),
            dut: profile.dut(),
            ..Self::default()
        }
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] on malformed input and [`ConfigError::Invalid`] when a
    /// field is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as [`Config::from_json`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks every field against its legal range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };

        if !(1..=64).contains(&self.dut.data_width) {
            return invalid("dut.data_width", "must be between 1 and 64");
        }
        if self.clock.period < 2 || self.clock.period % 2 != 0 {
            return invalid("clock.period", "must be an even number of at least 2");
        }
        if self.run.reset_cycles == 0 {
            return invalid("run.reset_cycles", "must be at least 1");
        }
        if self.run.patterns.is_empty() {
            return invalid("run.patterns", "must name at least one pattern");
        }
        if self.run.handshake_timeout == 0 {
            return invalid("run.handshake_timeout", "must be at least 1");
        }
        if self.run.max_cycles == 0 {
            return invalid("run.max_cycles", "must be at least 1");
        }
        check_probability("run.ready_probability", self.run.ready_probability)?;
        check_probability("run.valid_probability", self.run.valid_probability)
    }
}

/// Rejects a per-cycle probability outside `(0, 1]`, NaN included.
pub(crate) fn check_probability(field: &'static str, p: f64) -> Result<(), ConfigError> {
    if p > 0.0 && p <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be in (0, 1], got {p}"),
        })
    }
}

/// DUT build parameters (`DATA_WIDTH`, `REG_OUTPUT`) and reset style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DutConfig {
    /// Payload width in bits (1..=64).
    pub data_width: u32,
    /// Output stage is registered.
    pub reg_output: bool,
    /// Reset style of the DUT backend.
    ///
    /// The orchestrator drives one reset signal the same way for both kinds; a backend or
    /// model reads this to decide whether assertion takes effect immediately or on the next
    /// rising edge.
    pub reset: ResetKind,
}

impl Default for DutConfig {
    fn default() -> Self {
        Self {
            data_width: defaults::DATA_WIDTH,
            reg_output: false,
            reset: ResetKind::default(),
        }
    }
}

/// Clock settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Full period in `unit`s; must be even.
    pub period: u64,
    /// Time unit of `period`.
    pub unit: TimeUnit,
}

impl ClockConfig {
    /// Half of the period, the interval between consecutive edges.
    pub const fn half_period(&self) -> u64 {
        self.period / 2
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            period: defaults::CLOCK_PERIOD,
            unit: TimeUnit::default(),
        }
    }
}

/// Stimulus and watchdog settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    /// Rising edges the reset is held for.
    pub reset_cycles: u32,
    /// Items sent per traffic phase.
    pub item_count: usize,
    /// Stimulus random seed.
    pub seed: u64,
    /// Traffic phases, in order.
    pub patterns: Vec<Pattern>,
    /// Idle cycles between phases.
    pub quiescent_cycles: u32,
    /// Cycles after the last phase with downstream ready held high.
    pub drain_cycles: u32,
    /// Bound on the cycles an offered item may wait for `in_ready`.
    pub handshake_timeout: u64,
    /// Bound on the stimulus portion of the run.
    pub max_cycles: u64,
    /// Per-cycle probability of downstream ready under random backpressure.
    pub ready_probability: f64,
    /// Per-cycle probability of offering a pending item under random valid gating.
    pub valid_probability: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            reset_cycles: defaults::RESET_CYCLES,
            item_count: defaults::ITEM_COUNT,
            seed: defaults::SEED,
            patterns: Pattern::ALL.to_vec(),
            quiescent_cycles: defaults::QUIESCENT_CYCLES,
            drain_cycles: defaults::DRAIN_CYCLES,
            handshake_timeout: defaults::HANDSHAKE_TIMEOUT,
            max_cycles: defaults::MAX_CYCLES,
            ready_probability: defaults::READY_PROBABILITY,
            valid_probability: defaults::VALID_PROBABILITY,
        }
    }
}
