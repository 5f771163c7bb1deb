//! Valid/ready handshake verification library.
//!
//! This crate checks an opaque elastic buffer (a skid buffer with one payload in and
//! one payload out) against the valid/ready handshake contract. It provides:
//! 1. **Signals:** Typed access to both channels of the device under test through [`DutHandle`].
//! 2. **Stimulus:** A seeded, cycle-stepped driver producing no-backpressure, random-backpressure
//!    and random-valid traffic.
//! 3. **Monitors:** Data-stability and valid-stability checkers for each channel.
//! 4. **Scoreboards:** Independent transaction logs for the input and output channels and the
//!    end-of-run comparator.
//! 5. **Orchestration:** Clock, reset sequencing, the per-cycle schedule, and the run report.
//!
//! # Examples
//!
//! ```no_run
//! use skidcheck::{Config, ConfigError, DutHandle, Orchestrator, Profile};
//!
//! fn check_big<D: DutHandle>(dut: &mut D) -> Result<(), ConfigError> {
//!     let report = Orchestrator::new(Config::for_profile(Profile::Big))?.run(dut);
//!     assert!(report.passed(), "{}", report.diagnostics());
//!     Ok(())
//! }
//! ```

/// Shared types: channel samples, payload masking, and the error taxonomy.
pub mod common;
/// Run configuration (DUT profile, clock, stimulus and watchdog settings).
pub mod config;
/// Protocol monitors stepped once per clock sample.
pub mod monitor;
/// Transaction scoreboards and the end-of-run comparator.
pub mod scoreboard;
/// Clock, DUT signal surface, and the run orchestrator.
pub mod sim;
/// Per-run channel statistics.
pub mod stats;
/// Randomized stimulus driver for the input channel.
pub mod stimulus;

pub use crate::common::{ChannelId, ChannelSample, ConfigError, FailureClass, VerifyError};
pub use crate::config::{Config, Profile};
pub use crate::scoreboard::{Scoreboard, Transaction};
pub use crate::sim::{ChannelView, ClockEdge, DutHandle, Orchestrator, RunEnd, RunReport};
pub use crate::stimulus::{Pattern, StimulusDriver};
