//! Run configuration, motor presets, and construction-time validation.
//!
//! A [`SimulationConfig`] fully describes one transport run: which motors,
//! how many steps, track geometry, crowding and ATP budget, and the seed.
//! The number of motors selects the variant:
//!
//! - two motors: tug-of-war on a single microtubule
//! - three motors (kinesin, dynein, myosin order): microtubule plus actin,
//!   with obstacle-triggered direction flips
//!
//! An `initial_atp` budget composes with either variant.

use serde::{Deserialize, Serialize};

use crate::components::Motor;
use crate::rng::DEFAULT_SEED;

pub const DEFAULT_STEPS: u32 = 50;
pub const DEFAULT_TRACK_LENGTH: i64 = 100;
pub const DEFAULT_BINDING_PROBABILITY: f64 = 0.8;
pub const DEFAULT_OBSTACLE_COUNT: i64 = 10;
pub const DEFAULT_INITIAL_ATP: f64 = 200.0;

/// Construction inputs for one motor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorSpec {
    pub name: String,
    /// nm/s
    pub speed: f64,
    /// nm per step
    pub step_size: f64,
    /// pN
    pub stall_force: f64,
    /// ATP per bound step
    pub atp_cost: f64,
    /// Overrides the run-wide binding probability for this motor.
    #[serde(default)]
    pub binding_probability: Option<f64>,
}

impl MotorSpec {
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
            binding_probability: None,
        }
    }

    /// Plus-end directed microtubule motor.
    pub fn kinesin() -> Self {
        Self::new("Kinesin", 800.0, 8.0, 6.0, 1.0)
    }

    /// Minus-end directed microtubule motor.
    pub fn dynein() -> Self {
        Self::new("Dynein", 600.0, 8.0, 6.0, 1.0)
    }

    /// Actin motor.
    pub fn myosin() -> Self {
        Self::new("Myosin", 500.0, 5.0, 5.0, 1.0)
    }

    pub fn with_atp_cost(mut self, atp_cost: f64) -> Self {
        self.atp_cost = atp_cost;
        self
    }

    pub fn with_binding_probability(mut self, probability: f64) -> Self {
        self.binding_probability = Some(probability);
        self
    }

    pub fn build(&self) -> Motor {
        Motor::new(
            self.name.clone(),
            self.speed,
            self.step_size,
            self.stall_force,
            self.atp_cost,
        )
    }
}

/// Which step algorithm a config selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportVariant {
    /// Two opposing motors sharing one microtubule cursor.
    TugOfWar,
    /// Kinesin and dynein on a microtubule, myosin on actin, with crowding.
    MicrotubuleActin,
}

/// Everything needed to construct a [`crate::engine::TransportEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub motors: Vec<MotorSpec>,
    pub steps: u32,
    pub track_length: i64,
    pub binding_probability: f64,
    /// Obstacles per track. Only the microtubule/actin variant uses them.
    pub obstacle_count: Option<i64>,
    /// Enables energy-constrained gating when set.
    pub initial_atp: Option<f64>,
    pub seed: u64,
    /// Microtubule cursor; defaults to the middle of the track.
    pub start_position: Option<i64>,
    /// Actin cursor; defaults to a third of the way along.
    pub actin_start_position: Option<i64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            motors: vec![MotorSpec::kinesin(), MotorSpec::dynein()],
            steps: DEFAULT_STEPS,
            track_length: DEFAULT_TRACK_LENGTH,
            binding_probability: DEFAULT_BINDING_PROBABILITY,
            obstacle_count: None,
            initial_atp: None,
            seed: DEFAULT_SEED,
            start_position: None,
            actin_start_position: None,
        }
    }
}

impl SimulationConfig {
    /// Kinesin against dynein on one microtubule.
    pub fn tug_of_war() -> Self {
        Self::default()
    }

    /// Tug-of-war with a finite ATP budget.
    pub fn energy_constrained() -> Self {
        Self {
            initial_atp: Some(DEFAULT_INITIAL_ATP),
            ..Self::default()
        }
    }

    /// Kinesin/dynein on a crowded microtubule plus myosin on actin.
    pub fn with_actin() -> Self {
        Self {
            motors: vec![
                MotorSpec::kinesin(),
                MotorSpec::dynein(),
                MotorSpec::myosin(),
            ],
            obstacle_count: Some(DEFAULT_OBSTACLE_COUNT),
            ..Self::default()
        }
    }

    pub fn variant(&self) -> Option<TransportVariant> {
        match self.motors.len() {
            2 => Some(TransportVariant::TugOfWar),
            3 => Some(TransportVariant::MicrotubuleActin),
            _ => None,
        }
    }

    pub fn microtubule_start(&self) -> i64 {
        self.start_position.unwrap_or(self.track_length / 2)
    }

    pub fn actin_start(&self) -> i64 {
        self.actin_start_position.unwrap_or(self.track_length / 3)
    }

    /// Binding probability for the motor at `index`.
    pub fn binding_probability_for(&self, index: usize) -> f64 {
        self.motors
            .get(index)
            .and_then(|m| m.binding_probability)
            .unwrap_or(self.binding_probability)
    }

    /// Fail fast with the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match validate_config(self).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Track length must be positive.
    InvalidTrackLength(i64),
    /// A run needs at least one step.
    NoSteps,
    /// Obstacle count outside `[0, track_length]`.
    InvalidObstacleCount { count: i64, track_length: i64 },
    /// Initial ATP negative or NaN.
    InvalidInitialAtp(f64),
    /// Binding probability outside `[0, 1]`.
    InvalidBindingProbability(f64),
    /// Only two- and three-motor runs are modeled.
    UnsupportedMotorCount(usize),
    /// Obstacles were requested for the single-track tug-of-war.
    ObstaclesNeedActinTrack(i64),
    /// Motor index does not exist in this run.
    UnknownMotor(usize),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidTrackLength(len) => {
                write!(f, "track length must be positive, got {}", len)
            }
            ConfigError::NoSteps => write!(f, "step count must be positive"),
            ConfigError::InvalidObstacleCount {
                count,
                track_length,
            } => write!(
                f,
                "obstacle count {} outside 0..={} for this track",
                count, track_length
            ),
            ConfigError::InvalidInitialAtp(atp) => {
                write!(f, "initial ATP must be non-negative, got {}", atp)
            }
            ConfigError::InvalidBindingProbability(p) => {
                write!(f, "binding probability must be in [0, 1], got {}", p)
            }
            ConfigError::UnsupportedMotorCount(n) => {
                write!(f, "expected 2 or 3 motors, got {}", n)
            }
            ConfigError::ObstaclesNeedActinTrack(count) => write!(
                f,
                "{} obstacles requested but the two-motor run has no crowding model",
                count
            ),
            ConfigError::UnknownMotor(index) => write!(f, "no motor at index {}", index),
        }
    }
}

impl std::error::Error for ConfigError {}

pub(crate) fn check_probability(probability: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&probability) {
        Ok(probability)
    } else {
        Err(ConfigError::InvalidBindingProbability(probability))
    }
}

/// Validate a config, returning all errors found.
pub fn validate_config(config: &SimulationConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.track_length <= 0 {
        errors.push(ConfigError::InvalidTrackLength(config.track_length));
    }
    if config.steps == 0 {
        errors.push(ConfigError::NoSteps);
    }
    if let Err(e) = check_probability(config.binding_probability) {
        errors.push(e);
    }
    for spec in &config.motors {
        if let Some(p) = spec.binding_probability {
            if let Err(e) = check_probability(p) {
                errors.push(e);
            }
        }
    }
    if let Some(atp) = config.initial_atp {
        if atp.is_nan() || atp < 0.0 {
            errors.push(ConfigError::InvalidInitialAtp(atp));
        }
    }

    match config.variant() {
        None => errors.push(ConfigError::UnsupportedMotorCount(config.motors.len())),
        Some(TransportVariant::TugOfWar) => {
            if let Some(count) = config.obstacle_count.filter(|c| *c != 0) {
                errors.push(ConfigError::ObstaclesNeedActinTrack(count));
            }
        }
        Some(TransportVariant::MicrotubuleActin) => {}
    }

    if let Some(count) = config.obstacle_count {
        if count < 0 || (config.track_length > 0 && count > config.track_length) {
            errors.push(ConfigError::InvalidObstacleCount {
                count,
                track_length: config.track_length,
            });
        }
    }

    errors
}
