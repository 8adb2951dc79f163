//! Per-step observation records - the engine's only output.
//!
//! Each record is immutable once emitted and carries the ATP values the
//! engine cached for that step, so consumers never call back into a motor.

use serde::{Deserialize, Serialize};

use crate::components::{Direction, Motor};

/// Engine lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Running,
    /// The ATP pool ran dry; no further steps will execute.
    HaltedAtpDepleted,
    /// The step budget was exhausted.
    Completed,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RunState::Running)
    }
}

/// One motor's state as of the end of a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorReading {
    pub name: String,
    pub bound: bool,
    /// ATP charged this step.
    pub atp_used: f64,
    /// Running total for this motor.
    pub total_atp_used: f64,
}

impl MotorReading {
    pub(crate) fn new(motor: &Motor, atp_used: f64) -> Self {
        Self {
            name: motor.name().to_string(),
            bound: motor.is_bound(),
            atp_used,
            total_atp_used: motor.total_atp_used(),
        }
    }

    /// Reading for a motor that did not act this step.
    pub(crate) fn idle(motor: &Motor) -> Self {
        Self {
            name: motor.name().to_string(),
            bound: false,
            atp_used: 0.0,
            total_atp_used: motor.total_atp_used(),
        }
    }
}

/// A cursor on one track during one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorReading {
    pub position: i64,
    /// An obstacle sat at `position` this step.
    pub collision: bool,
    /// Direction applied to this track's primary motor.
    pub direction: Direction,
}

/// Variant-specific part of an observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StepDetail {
    TugOfWar {
        position: i64,
        direction: Direction,
    },
    MicrotubuleActin {
        microtubule: CursorReading,
        actin: CursorReading,
        /// Shared direction after both collision checks.
        direction: Direction,
    },
    /// Terminal record emitted when the ATP pool is found empty.
    Halted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// 1-based step index.
    pub step: u32,
    /// Engine state after this record.
    pub state: RunState,
    /// Motors in configuration order.
    pub motors: Vec<MotorReading>,
    /// Pool level after this step's deduction; `None` without a budget.
    pub atp_level: Option<f64>,
    pub detail: StepDetail,
}

impl Observation {
    /// ATP charged across all motors this step.
    pub fn step_atp(&self) -> f64 {
        self.motors.iter().map(|m| m.atp_used).sum()
    }

    pub fn is_halt(&self) -> bool {
        matches!(self.detail, StepDetail::Halted)
    }

    /// Direction in force after the step, if motion happened.
    pub fn direction(&self) -> Option<Direction> {
        match self.detail {
            StepDetail::TugOfWar { direction, .. } => Some(direction),
            StepDetail::MicrotubuleActin { direction, .. } => Some(direction),
            StepDetail::Halted => None,
        }
    }
}
