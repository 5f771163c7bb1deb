//! Traffic patterns applied by the stimulus driver.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One phase of input traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Pattern {
    /// Valid offered every cycle; downstream ready held high.
    NoBackpressure,
    /// Valid offered every cycle; downstream ready randomized per cycle.
    RandomBackpressure,
    /// Downstream ready randomized, and each item is offered only after a random number of
    /// idle cycles. Once offered, valid stays high until accepted.
    RandomValid,
}

impl Pattern {
    /// The default phase sequence.
    pub const ALL: [Self; 3] = [Self::NoBackpressure, Self::RandomBackpressure, Self::RandomValid];

    /// Downstream ready is randomized during this phase.
    pub const fn random_ready(self) -> bool {
        !matches!(self, Self::NoBackpressure)
    }

    /// Valid is randomly gated before each item is first offered.
    pub const fn gates_valid(self) -> bool {
        matches!(self, Self::RandomValid)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NoBackpressure => "no-backpressure",
            Self::RandomBackpressure => "random-backpressure",
            Self::RandomValid => "random-valid",
        };
        f.write_str(s)
    }
}
