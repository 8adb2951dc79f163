//! Cytoplasmic crowding: a fixed set of obstacle positions on a track.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Obstacle positions drawn once, without replacement, from
/// `[0, track_length)`. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: BTreeSet<i64>,
}

impl ObstacleField {
    pub fn new(
        track_length: i64,
        obstacle_count: i64,
        rng: &mut impl Rng,
    ) -> Result<Self, ConfigError> {
        if track_length <= 0 {
            return Err(ConfigError::InvalidTrackLength(track_length));
        }
        if obstacle_count < 0 || obstacle_count > track_length {
            return Err(ConfigError::InvalidObstacleCount {
                count: obstacle_count,
                track_length,
            });
        }

        let obstacles = rand::seq::index::sample(rng, track_length as usize, obstacle_count as usize)
            .into_iter()
            .map(|i| i as i64)
            .collect();

        Ok(Self { obstacles })
    }

    /// A field with no obstacles; every collision query is false.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether `position` coincides with an obstacle.
    pub fn check_collision(&self, position: i64) -> bool {
        self.obstacles.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Obstacle positions in ascending order.
    pub fn positions(&self) -> impl Iterator<Item = i64> + '_ {
        self.obstacles.iter().copied()
    }
}
