//! Shared value types used by tracks, the engine and observations.

use serde::{Deserialize, Serialize};

/// Sign of travel along a track.
///
/// In the tug-of-war model direction belongs to the motor interaction, not
/// to any single motor, so the engine holds exactly one of these per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Plus,
    Minus,
}

impl Direction {
    /// +1.0 or -1.0, for scaling a displacement.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Plus => 1.0,
            Direction::Minus => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Plus => Direction::Minus,
            Direction::Minus => Direction::Plus,
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Direction::Plus => 1,
            Direction::Minus => -1,
        }
    }
}

impl std::ops::Neg for Direction {
    type Output = Self;
    fn neg(self) -> Self {
        self.flipped()
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

/// Which cytoskeletal filament a track models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackKind {
    /// Used by kinesin and dynein.
    Microtubule,
    /// Used by myosin.
    Actin,
}

impl TrackKind {
    pub fn label(self) -> &'static str {
        match self {
            TrackKind::Microtubule => "microtubule",
            TrackKind::Actin => "actin",
        }
    }
}
