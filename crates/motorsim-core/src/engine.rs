//! Transport engine - owns one run and drives the discrete step loop

use crate::components::*;
use crate::config::{check_probability, ConfigError, SimulationConfig, TransportVariant};
use crate::observation::{CursorReading, MotorReading, Observation, RunState, StepDetail};
use crate::observers::Observer;
use crate::rng::SimRng;
use crate::systems::*;

/// Tracks, cursors and crowding for the selected variant.
#[derive(Debug, Clone)]
enum Layout {
    TugOfWar {
        track: Track,
        position: i64,
    },
    MicrotubuleActin {
        microtubule: Track,
        actin: Track,
        microtubule_position: i64,
        actin_position: i64,
        microtubule_obstacles: ObstacleField,
        actin_obstacles: ObstacleField,
    },
}

/// A single transport run.
///
/// Everything mutable during the run lives here: the motors, tracks, the
/// shared direction, the ATP pool and the random source. Nothing is shared
/// between runs. Pull observations with [`TransportEngine::step`] or by
/// iterating the engine.
#[derive(Debug, Clone)]
pub struct TransportEngine {
    motors: Vec<Motor>,
    /// Binding probability per motor, same order as `motors`.
    probabilities: Vec<f64>,
    layout: Layout,
    energy: Option<EnergyPool>,
    rng: SimRng,
    direction: Direction,
    steps_taken: u32,
    total_steps: u32,
    state: RunState,
}

impl TransportEngine {
    /// Validate `config` and construct every component for the run.
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let variant = config
            .variant()
            .ok_or(ConfigError::UnsupportedMotorCount(config.motors.len()))?;

        let mut rng = SimRng::from_seed_u64(config.seed);
        let motors: Vec<Motor> = config.motors.iter().map(|spec| spec.build()).collect();
        let probabilities = (0..motors.len())
            .map(|i| config.binding_probability_for(i))
            .collect();

        let layout = match variant {
            TransportVariant::TugOfWar => Layout::TugOfWar {
                track: Track::new(TrackKind::Microtubule, config.track_length)?,
                position: config.microtubule_start(),
            },
            TransportVariant::MicrotubuleActin => {
                let count = config.obstacle_count.unwrap_or(0);
                Layout::MicrotubuleActin {
                    microtubule: Track::new(TrackKind::Microtubule, config.track_length)?,
                    actin: Track::new(TrackKind::Actin, config.track_length)?,
                    microtubule_position: config.microtubule_start(),
                    actin_position: config.actin_start(),
                    microtubule_obstacles: ObstacleField::new(
                        config.track_length,
                        count,
                        &mut rng,
                    )?,
                    actin_obstacles: ObstacleField::new(config.track_length, count, &mut rng)?,
                }
            }
        };

        let energy = config.initial_atp.map(EnergyPool::new).transpose()?;

        log::info!(
            "Transport run: {:?}, {} motors, {} steps, track length {}, seed {}{}",
            variant,
            motors.len(),
            config.steps,
            config.track_length,
            config.seed,
            match config.initial_atp {
                Some(atp) => format!(", ATP budget {}", atp),
                None => String::new(),
            }
        );

        Ok(Self {
            motors,
            probabilities,
            layout,
            energy,
            rng,
            direction: Direction::Plus,
            steps_taken: 0,
            total_steps: config.steps,
            state: RunState::Running,
        })
    }

    /// Execute one step and return its observation.
    ///
    /// Returns `None` once the run is in a terminal state. A depleted pool
    /// yields exactly one `Halted` record, after which the run stays halted.
    pub fn step(&mut self) -> Option<Observation> {
        if self.state.is_terminal() {
            return None;
        }

        if !has_energy(self.energy.as_ref()) {
            self.state = RunState::HaltedAtpDepleted;
            log::info!(
                "ATP depleted before step {}! Motors stop.",
                self.steps_taken + 1
            );
            return Some(Observation {
                step: self.steps_taken + 1,
                state: self.state,
                motors: self.motors.iter().map(MotorReading::idle).collect(),
                atp_level: self.atp_level(),
                detail: StepDetail::Halted,
            });
        }

        self.steps_taken += 1;
        let step = self.steps_taken;

        binding_system(&mut self.motors, &self.probabilities, &mut self.rng);
        let detail = advance_layout(&mut self.layout, &self.motors, &mut self.direction, step);

        let costs = charge_motors(&mut self.motors);
        deduct_step_cost(self.energy.as_mut(), &costs);

        if step >= self.total_steps {
            self.state = RunState::Completed;
            log::info!("Transport run completed after {} steps", step);
        }

        Some(Observation {
            step,
            state: self.state,
            motors: self
                .motors
                .iter()
                .zip(&costs)
                .map(|(motor, cost)| MotorReading::new(motor, *cost))
                .collect(),
            atp_level: self.atp_level(),
            detail,
        })
    }

    /// Run to a terminal state, collecting every observation.
    pub fn run_to_end(&mut self) -> Vec<Observation> {
        self.by_ref().collect()
    }

    /// Run to a terminal state, handing each observation to `observer`.
    pub fn run_with<O: Observer + ?Sized>(&mut self, observer: &mut O) -> RunState {
        while let Some(observation) = self.step() {
            observer.observe(&observation);
        }
        observer.finish(self.state);
        self.state
    }

    /// Change one motor's binding probability for subsequent steps.
    pub fn set_binding_probability(
        &mut self,
        motor_index: usize,
        probability: f64,
    ) -> Result<(), ConfigError> {
        let probability = check_probability(probability)?;
        let slot = self
            .probabilities
            .get_mut(motor_index)
            .ok_or(ConfigError::UnknownMotor(motor_index))?;
        *slot = probability;
        Ok(())
    }

    pub fn variant(&self) -> TransportVariant {
        match self.layout {
            Layout::TugOfWar { .. } => TransportVariant::TugOfWar,
            Layout::MicrotubuleActin { .. } => TransportVariant::MicrotubuleActin,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    pub fn motors(&self) -> &[Motor] {
        &self.motors
    }

    pub fn atp_level(&self) -> Option<f64> {
        self.energy.as_ref().map(EnergyPool::atp_level)
    }

    pub fn track(&self, kind: TrackKind) -> Option<&Track> {
        match (&self.layout, kind) {
            (Layout::TugOfWar { track, .. }, TrackKind::Microtubule) => Some(track),
            (Layout::TugOfWar { .. }, TrackKind::Actin) => None,
            (Layout::MicrotubuleActin { microtubule, .. }, TrackKind::Microtubule) => {
                Some(microtubule)
            }
            (Layout::MicrotubuleActin { actin, .. }, TrackKind::Actin) => Some(actin),
        }
    }

    /// Cursor index on the given track.
    pub fn position(&self, kind: TrackKind) -> Option<i64> {
        match (&self.layout, kind) {
            (Layout::TugOfWar { position, .. }, TrackKind::Microtubule) => Some(*position),
            (Layout::TugOfWar { .. }, TrackKind::Actin) => None,
            (
                Layout::MicrotubuleActin {
                    microtubule_position,
                    ..
                },
                TrackKind::Microtubule,
            ) => Some(*microtubule_position),
            (Layout::MicrotubuleActin { actin_position, .. }, TrackKind::Actin) => {
                Some(*actin_position)
            }
        }
    }

    pub fn obstacles(&self, kind: TrackKind) -> Option<&ObstacleField> {
        match (&self.layout, kind) {
            (
                Layout::MicrotubuleActin {
                    microtubule_obstacles,
                    ..
                },
                TrackKind::Microtubule,
            ) => Some(microtubule_obstacles),
            (
                Layout::MicrotubuleActin {
                    actin_obstacles, ..
                },
                TrackKind::Actin,
            ) => Some(actin_obstacles),
            (Layout::TugOfWar { .. }, _) => None,
        }
    }
}

impl Iterator for TransportEngine {
    type Item = Observation;

    fn next(&mut self) -> Option<Observation> {
        self.step()
    }
}

impl std::iter::FusedIterator for TransportEngine {}

/// Resolve direction and apply motion for one step of the layout.
fn advance_layout(
    layout: &mut Layout,
    motors: &[Motor],
    direction: &mut Direction,
    step: u32,
) -> StepDetail {
    match layout {
        Layout::TugOfWar { track, position } => {
            let (first, second) = (&motors[0], &motors[1]);
            *direction = resolve_direction(first.is_bound(), second.is_bound(), *direction);
            apply_opposed_pair(track, first, second, *position, *direction);

            StepDetail::TugOfWar {
                position: *position,
                direction: *direction,
            }
        }
        Layout::MicrotubuleActin {
            microtubule,
            actin,
            microtubule_position,
            actin_position,
            microtubule_obstacles,
            actin_obstacles,
        } => {
            // Both tracks share one direction: a hit on either flips it for both,
            // and hits on both in the same step cancel out.
            let mt_collision =
                crowding_system(microtubule_obstacles, *microtubule_position, direction);
            if mt_collision {
                log::debug!(
                    "Step {}: collision on microtubule at position {}, reversing direction",
                    step,
                    microtubule_position
                );
            }
            let mt_direction = *direction;
            apply_opposed_pair(
                microtubule,
                &motors[0],
                &motors[1],
                *microtubule_position,
                mt_direction,
            );

            let actin_collision = crowding_system(actin_obstacles, *actin_position, direction);
            if actin_collision {
                log::debug!(
                    "Step {}: collision on actin at position {}, reversing direction",
                    step,
                    actin_position
                );
            }
            let actin_direction = *direction;
            actin.update_position(&motors[2], *actin_position, actin_direction);

            StepDetail::MicrotubuleActin {
                microtubule: CursorReading {
                    position: *microtubule_position,
                    collision: mt_collision,
                    direction: mt_direction,
                },
                actin: CursorReading {
                    position: *actin_position,
                    collision: actin_collision,
                    direction: actin_direction,
                },
                direction: *direction,
            }
        }
    }
}

/// Build an engine from `config` and run it to completion.
pub fn run_transport_simulation(
    config: &SimulationConfig,
) -> Result<Vec<Observation>, ConfigError> {
    Ok(TransportEngine::new(config)?.run_to_end())
}
