//! Simulation timeline and run orchestration.
//!
//! Provides the clock, the DUT signal surface, the per-cycle run loop, and the run report.

/// Two-phase clock and the edge-wait primitive.
pub mod clock;
/// DUT capability contract and per-channel accessors.
pub mod dut;
/// Reset sequencing, watcher scheduling and comparison.
pub mod orchestrator;
/// Run outcome and diagnostics.
pub mod report;

pub use clock::{ClockEdge, ClockSource};
pub use dut::{ChannelView, DutHandle};
pub use orchestrator::Orchestrator;
pub use report::{RunEnd, RunReport};
