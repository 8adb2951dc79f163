//! motorsim Core - Motor-Protein Cargo Transport Engine
//!
//! A discrete-time stochastic model of kinesin, dynein and myosin motors
//! hauling cargo along microtubule and actin tracks. Each step the motors
//! re-roll their binding, the engine resolves a shared direction by
//! tug-of-war and obstacle collisions, displacement is recorded on the
//! tracks, and ATP is charged against an optional finite budget.
//!
//! # Architecture
//!
//! - **Components**: `Motor`, `Track`, `ObstacleField`, `EnergyPool`
//! - **Systems**: per-step rules (binding, tug-of-war, crowding, ATP)
//! - **Engine**: `TransportEngine` owns one run and yields `Observation`s
//! - **Observers**: consumers of the stream (text log, ATP series, JSON lines)
//!
//! # Example
//!
//! ```rust
//! use motorsim_core::prelude::*;
//!
//! let config = SimulationConfig {
//!     initial_atp: Some(20.0),
//!     seed: 7,
//!     ..SimulationConfig::default()
//! };
//!
//! let mut engine = TransportEngine::new(&config).unwrap();
//! let mut series = AtpSeries::new();
//! let state = engine.run_with(&mut series);
//!
//! assert!(state.is_terminal());
//! assert_eq!(engine.atp_level(), Some(0.0));
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod observation;
pub mod observers;
pub mod rng;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::{ConfigError, MotorSpec, SimulationConfig, TransportVariant};
    pub use crate::engine::{run_transport_simulation, TransportEngine};
    pub use crate::observation::{MotorReading, Observation, RunState, StepDetail};
    pub use crate::observers::{AtpSeries, JsonLines, Observer, TextLog};
    pub use crate::rng::SimRng;
}
