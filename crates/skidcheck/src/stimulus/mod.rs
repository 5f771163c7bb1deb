//! Input-channel stimulus.
//!
//! The [`StimulusDriver`] is the protocol-correct reference sender. It owns `in_valid`,
//! `in_data` and the downstream `out_ready`, and steps through a sequence of [`Pattern`]s.

/// Cycle-stepped driver state machine.
pub mod driver;
/// Traffic pattern definitions.
pub mod pattern;

pub use driver::StimulusDriver;
pub use pattern::Pattern;
