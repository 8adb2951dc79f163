//! Motor protein component: binding state and the step/ATP contract.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A motor protein walking a cytoskeletal track.
///
/// Kinematic constants are fixed at construction. `bound` is re-rolled every
/// step by [`Motor::bind_to_track`]; `total_atp_used` only grows, and only
/// through [`Motor::consume_atp`] while bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motor {
    name: String,
    /// nm/s
    speed: f64,
    /// nm per step
    step_size: f64,
    /// pN
    stall_force: f64,
    /// ATP per bound step
    atp_cost: f64,
    bound: bool,
    total_atp_used: f64,
}

impl Motor {
    pub fn new(
        name: impl Into<String>,
        speed: f64,
        step_size: f64,
        stall_force: f64,
        atp_cost: f64,
    ) -> Self {
        Self {
            name: name.into(),
            speed,
            step_size,
            stall_force,
            atp_cost,
            bound: false,
            total_atp_used: 0.0,
        }
    }

    /// Roll a fresh binding state. The previous state is discarded.
    ///
    /// Samples are drawn from `[0, 1)`, so a probability of `1.0` always
    /// binds and `0.0` never does.
    pub fn bind_to_track(&mut self, probability: f64, rng: &mut impl Rng) {
        let sample: f64 = rng.gen();
        self.bound = sample < probability;
    }

    /// Displacement produced this step.
    pub fn step(&self) -> f64 {
        if self.bound {
            self.step_size
        } else {
            0.0
        }
    }

    /// Charge this step's ATP and return what was charged.
    ///
    /// Not idempotent: every call while bound adds `atp_cost` again. Call it
    /// once per step and reuse the result.
    pub fn consume_atp(&mut self) -> f64 {
        if self.bound {
            self.total_atp_used += self.atp_cost;
            self.atp_cost
        } else {
            0.0
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn stall_force(&self) -> f64 {
        self.stall_force
    }

    pub fn atp_cost(&self) -> f64 {
        self.atp_cost
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn total_atp_used(&self) -> f64 {
        self.total_atp_used
    }
}
