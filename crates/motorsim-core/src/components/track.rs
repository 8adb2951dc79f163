//! Cytoskeletal track: a bounded 1-D ledger of signed displacement.

use serde::{Deserialize, Serialize};

use super::{Direction, Motor, TrackKind};
use crate::config::ConfigError;

/// Discretized filament. `positions[i]` is the cumulative displacement
/// recorded at index `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    kind: TrackKind,
    positions: Vec<f64>,
}

impl Track {
    /// Build a zeroed track. `length` must be positive.
    pub fn new(kind: TrackKind, length: i64) -> Result<Self, ConfigError> {
        if length <= 0 {
            return Err(ConfigError::InvalidTrackLength(length));
        }
        Ok(Self {
            kind,
            positions: vec![0.0; length as usize],
        })
    }

    /// Add `motor.step() * direction` at `index`.
    ///
    /// An index outside `[0, length)` is off-track: nothing is recorded.
    pub fn update_position(&mut self, motor: &Motor, index: i64, direction: Direction) {
        if let Some(slot) = self.slot_mut(index) {
            *slot += motor.step() * direction.sign();
        }
    }

    fn slot_mut(&mut self, index: i64) -> Option<&mut f64> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.positions.get_mut(i))
    }

    pub fn contains(&self, index: i64) -> bool {
        index >= 0 && (index as usize) < self.positions.len()
    }

    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    pub fn length(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Displacement at `index`, or `None` off-track.
    pub fn displacement_at(&self, index: i64) -> Option<f64> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.positions.get(i).copied())
    }

    /// Sum of all recorded displacement.
    pub fn net_displacement(&self) -> f64 {
        self.positions.iter().sum()
    }
}
