//! Causal directions and the signed preference statistic.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One orientation of a sample pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Column 0 causes column 1 (A→B).
    Forward,
    /// Column 1 causes column 0 (B→A).
    Reverse,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Forward, Direction::Reverse];

    /// Index used to derive per-direction random streams.
    pub fn index(self) -> u64 {
        match self {
            Self::Forward => 0,
            Self::Reverse => 1,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => f.write_str("A->B"),
            Self::Reverse => f.write_str("B->A"),
        }
    }
}

/// Signed causal-preference statistic.
///
/// Positive values favour A→B, negative values favour B→A. The magnitude
/// is a heuristic strength, not a probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Preference(pub f64);

impl Preference {
    pub fn value(self) -> f64 {
        self.0
    }

    /// The favoured direction, or `None` when the statistic is exactly zero
    /// or not a number.
    pub fn direction(self) -> Option<Direction> {
        if self.0 > 0.0 {
            Some(Direction::Forward)
        } else if self.0 < 0.0 {
            Some(Direction::Reverse)
        } else {
            None
        }
    }
}
