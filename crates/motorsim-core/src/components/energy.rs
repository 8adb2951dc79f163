//! Finite ATP budget for an energy-constrained run.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// ATP available to all motors in a run. Never negative, never refilled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyPool {
    atp_level: f64,
}

impl EnergyPool {
    pub fn new(initial_atp: f64) -> Result<Self, ConfigError> {
        if initial_atp.is_nan() || initial_atp < 0.0 {
            return Err(ConfigError::InvalidInitialAtp(initial_atp));
        }
        Ok(Self {
            atp_level: initial_atp,
        })
    }

    /// Withdraw `amount`, flooring the level at zero.
    pub fn consume_atp(&mut self, amount: f64) {
        self.atp_level = (self.atp_level - amount.max(0.0)).max(0.0);
    }

    pub fn is_depleted(&self) -> bool {
        self.atp_level <= 0.0
    }

    pub fn atp_level(&self) -> f64 {
        self.atp_level
    }
}
