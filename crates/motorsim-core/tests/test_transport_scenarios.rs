//! End-to-end transport runs through the public engine API.
//!
//! Exercises: SimulationConfig → TransportEngine → Observation stream
//! → Track / EnergyPool / Motor end state.

use motorsim_core::prelude::*;

// ── Helpers ────────────────────────────────────────────────────────────

fn always_bound_pair(step_b: f64) -> Vec<MotorSpec> {
    vec![
        MotorSpec::kinesin(),
        MotorSpec::new("Dynein", 600.0, step_b, 6.0, 1.0),
    ]
}

fn actin_run(track_length: i64, obstacles: i64, steps: u32) -> SimulationConfig {
    SimulationConfig {
        track_length,
        obstacle_count: Some(obstacles),
        steps,
        seed: 1234,
        ..SimulationConfig::with_actin()
    }
}

// ── Scenario A: always-bound tug-of-war ────────────────────────────────

#[test]
fn always_bound_first_motor_pins_direction_plus() {
    let config = SimulationConfig {
        motors: always_bound_pair(6.0),
        steps: 5,
        track_length: 10,
        binding_probability: 1.0,
        start_position: Some(5),
        ..Default::default()
    };
    let mut engine = TransportEngine::new(&config).unwrap();
    let observations = engine.run_to_end();

    assert_eq!(observations.len(), 5);
    for (i, obs) in observations.iter().enumerate() {
        assert_eq!(obs.step, i as u32 + 1);
        assert_eq!(
            obs.detail,
            StepDetail::TugOfWar {
                position: 5,
                direction: Direction::Plus
            }
        );
        assert!(obs.motors.iter().all(|m| m.bound));
    }

    let track = engine.track(TrackKind::Microtubule).unwrap();
    assert_eq!(track.displacement_at(5), Some(5.0 * (8.0 - 6.0)));
    // Nothing recorded anywhere but the cursor
    assert_eq!(track.net_displacement(), 10.0);
    assert_eq!(engine.state(), RunState::Completed);
}

// ── Scenario B: one step of ATP ────────────────────────────────────────

#[test]
fn budget_for_one_step_halts_from_step_two() {
    for initial_atp in [1.0, 2.0] {
        let config = SimulationConfig {
            motors: always_bound_pair(8.0),
            steps: 5,
            track_length: 10,
            binding_probability: 1.0,
            initial_atp: Some(initial_atp),
            ..Default::default()
        };
        let mut engine = TransportEngine::new(&config).unwrap();
        let observations = engine.run_to_end();

        assert_eq!(observations.len(), 2, "initial_atp={}", initial_atp);

        let first = &observations[0];
        assert_eq!(first.step, 1);
        assert_eq!(first.state, RunState::Running);
        assert_eq!(first.step_atp(), 2.0);
        assert_eq!(first.atp_level, Some(0.0));

        let halt = &observations[1];
        assert_eq!(halt.step, 2);
        assert_eq!(halt.state, RunState::HaltedAtpDepleted);
        assert!(halt.is_halt());
        assert_eq!(halt.step_atp(), 0.0);
        assert_eq!(halt.atp_level, Some(0.0));

        // Stays halted
        assert!(engine.step().is_none());
        assert!(engine.step().is_none());
        assert_eq!(engine.state(), RunState::HaltedAtpDepleted);
        assert_eq!(engine.atp_level(), Some(0.0));
        assert_eq!(engine.steps_taken(), 1);
        assert!(engine.motors().iter().all(|m| m.total_atp_used() == 1.0));
    }
}

#[test]
fn empty_budget_halts_before_any_motion() {
    let config = SimulationConfig {
        binding_probability: 1.0,
        initial_atp: Some(0.0),
        ..Default::default()
    };
    let mut engine = TransportEngine::new(&config).unwrap();
    let observations = engine.run_to_end();

    assert_eq!(observations.len(), 1);
    assert_eq!(observations[0].step, 1);
    assert!(observations[0].is_halt());
    assert_eq!(
        engine.track(TrackKind::Microtubule).unwrap().net_displacement(),
        0.0
    );
    assert!(engine.motors().iter().all(|m| m.total_atp_used() == 0.0));
}

#[test]
fn no_motion_or_spend_after_depletion() {
    let config = SimulationConfig {
        initial_atp: Some(15.0),
        steps: 200,
        seed: 99,
        ..Default::default()
    };
    let mut engine = TransportEngine::new(&config).unwrap();
    let observations = engine.run_to_end();

    let halt_index = observations
        .iter()
        .position(|o| o.is_halt())
        .expect("budget of 15 cannot last 200 steps");
    assert_eq!(halt_index, observations.len() - 1);

    let spent: f64 = observations.iter().map(|o| o.step_atp()).sum();
    let charged: f64 = engine.motors().iter().map(|m| m.total_atp_used()).sum();
    assert_eq!(spent, charged);
    assert!(spent >= 15.0);

    let snapshot = engine.track(TrackKind::Microtubule).unwrap().clone();
    assert!(engine.step().is_none());
    assert_eq!(engine.track(TrackKind::Microtubule).unwrap(), &snapshot);
    assert_eq!(engine.state(), RunState::HaltedAtpDepleted);
}

#[test]
fn atp_level_never_negative_and_never_rises() {
    let config = SimulationConfig {
        motors: vec![
            MotorSpec::kinesin().with_atp_cost(3.0),
            MotorSpec::dynein().with_atp_cost(2.5),
        ],
        initial_atp: Some(40.0),
        seed: 5,
        ..Default::default()
    };
    let observations = run_transport_simulation(&config).unwrap();
    let mut last = 40.0;
    for obs in &observations {
        let level = obs.atp_level.unwrap();
        assert!(level >= 0.0);
        assert!(level <= last);
        last = level;
    }
}

// ── Scenario C: every position is an obstacle ──────────────────────────

#[test]
fn full_crowding_flips_on_every_collision() {
    let mut engine = TransportEngine::new(&actin_run(20, 20, 8)).unwrap();
    let mut previous = engine.direction();

    for obs in engine.by_ref() {
        let StepDetail::MicrotubuleActin {
            microtubule,
            actin,
            direction,
        } = obs.detail
        else {
            panic!("expected a two-track observation");
        };
        assert!(microtubule.collision);
        assert!(actin.collision);
        assert_eq!(microtubule.direction, -previous);
        assert_eq!(actin.direction, -microtubule.direction);
        // Two hits in one step cancel
        assert_eq!(direction, previous);
        previous = direction;
    }
}

#[test]
fn flipped_direction_reaches_both_tracks() {
    let config = SimulationConfig {
        motors: vec![
            MotorSpec::kinesin(),
            MotorSpec::new("Dynein", 600.0, 6.0, 6.0, 1.0),
            MotorSpec::myosin(),
        ],
        binding_probability: 1.0,
        ..actin_run(20, 20, 7)
    };
    let mut engine = TransportEngine::new(&config).unwrap();
    let observations = engine.run_to_end();

    let mut expected_mt = 0.0;
    let mut expected_actin = 0.0;
    for obs in &observations {
        let StepDetail::MicrotubuleActin {
            microtubule, actin, ..
        } = obs.detail
        else {
            panic!("expected a two-track observation");
        };
        expected_mt += (8.0 - 6.0) * microtubule.direction.sign();
        expected_actin += 5.0 * actin.direction.sign();
    }

    // The microtubule hit always lands first, so it moves against the
    // shared direction every step while the actin hit restores it
    assert_eq!(expected_mt, -14.0);
    assert_eq!(expected_actin, 35.0);
    let mt = engine.track(TrackKind::Microtubule).unwrap();
    assert_eq!(mt.displacement_at(config.microtubule_start()), Some(expected_mt));
    assert_eq!(mt.net_displacement(), expected_mt);

    let actin = engine.track(TrackKind::Actin).unwrap();
    assert_eq!(actin.displacement_at(config.actin_start()), Some(expected_actin));
    assert_eq!(actin.net_displacement(), expected_actin);
}

#[test]
fn single_track_collision_alternates_direction_each_step() {
    let config = SimulationConfig {
        actin_start_position: Some(-1),
        ..actin_run(20, 20, 8)
    };
    let observations = run_transport_simulation(&config).unwrap();

    let mut previous = Direction::Plus;
    for obs in &observations {
        let direction = obs.direction().unwrap();
        assert_eq!(direction, -previous, "step {}", obs.step);
        previous = direction;
    }
}

#[test]
fn clear_tracks_keep_initial_direction() {
    let observations = run_transport_simulation(&actin_run(50, 0, 20)).unwrap();
    assert!(observations
        .iter()
        .all(|o| o.direction() == Some(Direction::Plus)));
}

#[test]
fn energy_budget_halts_two_track_run() {
    let config = SimulationConfig {
        initial_atp: Some(5.0),
        binding_probability: 1.0,
        ..SimulationConfig::with_actin()
    };
    let mut engine = TransportEngine::new(&config).unwrap();
    let observations = engine.run_to_end();

    // Three bound motors spend 3 per step: 5 -> 2 -> 0, then halt
    assert_eq!(observations.len(), 3);
    assert_eq!(observations[0].step_atp(), 3.0);
    assert_eq!(observations[0].atp_level, Some(2.0));
    assert_eq!(observations[1].step_atp(), 3.0);
    assert_eq!(observations[1].atp_level, Some(0.0));

    let halt = &observations[2];
    assert_eq!(halt.step, 3);
    assert!(halt.is_halt());
    assert_eq!(halt.state, RunState::HaltedAtpDepleted);
    assert_eq!(halt.step_atp(), 0.0);
    assert_eq!(halt.motors.len(), 3);

    let microtubule = engine.track(TrackKind::Microtubule).unwrap().clone();
    let actin = engine.track(TrackKind::Actin).unwrap().clone();
    assert!(engine.step().is_none());
    assert!(engine.next().is_none());
    assert_eq!(engine.track(TrackKind::Microtubule).unwrap(), &microtubule);
    assert_eq!(engine.track(TrackKind::Actin).unwrap(), &actin);
    assert_eq!(engine.state(), RunState::HaltedAtpDepleted);
    assert_eq!(engine.steps_taken(), 2);
    assert!(engine.motors().iter().all(|m| m.total_atp_used() == 2.0));
}

// ── Bookkeeping invariants ─────────────────────────────────────────────

#[test]
fn each_motor_charged_exactly_once_per_bound_step() {
    let config = SimulationConfig {
        motors: vec![
            MotorSpec::kinesin().with_atp_cost(2.5),
            MotorSpec::dynein().with_atp_cost(0.5),
            MotorSpec::myosin().with_atp_cost(4.0),
        ],
        steps: 100,
        binding_probability: 0.5,
        seed: 31,
        ..SimulationConfig::with_actin()
    };
    let costs = [2.5, 0.5, 4.0];
    let observations = run_transport_simulation(&config).unwrap();

    let mut previous = [0.0; 3];
    for obs in &observations {
        for (i, reading) in obs.motors.iter().enumerate() {
            let expected = if reading.bound { costs[i] } else { 0.0 };
            assert_eq!(reading.atp_used, expected);
            assert_eq!(reading.total_atp_used - previous[i], expected);
            previous[i] = reading.total_atp_used;
        }
    }
}

#[test]
fn atp_series_matches_motor_totals() {
    let mut engine = TransportEngine::new(&SimulationConfig::with_actin()).unwrap();
    let mut series = AtpSeries::new();
    engine.run_with(&mut series);

    assert_eq!(series.len(), 50);
    assert_eq!(series.names(), &["Kinesin", "Dynein", "Myosin"]);
    let totals: Vec<f64> = engine.motors().iter().map(|m| m.total_atp_used()).collect();
    assert_eq!(series.totals(), totals);
}

// ── Direction stickiness ───────────────────────────────────────────────

#[test]
fn direction_sticks_through_unbound_steps() {
    let config = SimulationConfig {
        motors: vec![
            MotorSpec::kinesin().with_binding_probability(0.0),
            MotorSpec::dynein().with_binding_probability(1.0),
        ],
        steps: 6,
        ..Default::default()
    };
    let mut engine = TransportEngine::new(&config).unwrap();

    for _ in 0..2 {
        let obs = engine.step().unwrap();
        assert_eq!(obs.direction(), Some(Direction::Minus));
    }

    engine.set_binding_probability(1, 0.0).unwrap();
    let before = engine.track(TrackKind::Microtubule).unwrap().clone();
    let rest: Vec<Observation> = engine.by_ref().collect();

    assert_eq!(rest.len(), 4);
    for obs in &rest {
        assert!(obs.motors.iter().all(|m| !m.bound));
        assert_eq!(obs.direction(), Some(Direction::Minus));
    }
    assert_eq!(engine.track(TrackKind::Microtubule).unwrap(), &before);
}

#[test]
fn never_bound_run_keeps_initial_direction() {
    let config = SimulationConfig {
        binding_probability: 0.0,
        steps: 5,
        ..Default::default()
    };
    let observations = run_transport_simulation(&config).unwrap();
    assert!(observations
        .iter()
        .all(|o| o.direction() == Some(Direction::Plus) && o.step_atp() == 0.0));
}

// ── Determinism ────────────────────────────────────────────────────────

#[test]
fn same_seed_same_stream() {
    for config in [
        SimulationConfig::tug_of_war(),
        SimulationConfig::energy_constrained(),
        SimulationConfig::with_actin(),
    ] {
        let a = run_transport_simulation(&config).unwrap();
        let b = run_transport_simulation(&config).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn different_seed_different_stream() {
    let a = run_transport_simulation(&SimulationConfig {
        seed: 1,
        ..Default::default()
    })
    .unwrap();
    let b = run_transport_simulation(&SimulationConfig {
        seed: 2,
        ..Default::default()
    })
    .unwrap();
    assert_ne!(a, b);
}

// ── Off-track cursors ──────────────────────────────────────────────────

#[test]
fn off_track_cursor_records_nothing_but_still_spends_atp() {
    for start in [-1, 10] {
        let config = SimulationConfig {
            track_length: 10,
            start_position: Some(start),
            binding_probability: 1.0,
            steps: 3,
            ..Default::default()
        };
        let mut engine = TransportEngine::new(&config).unwrap();
        let observations = engine.run_to_end();

        let track = engine.track(TrackKind::Microtubule).unwrap();
        assert!(track.positions().iter().all(|p| *p == 0.0));
        assert_eq!(observations.iter().map(|o| o.step_atp()).sum::<f64>(), 6.0);
    }
}

// ── Construction errors ────────────────────────────────────────────────

#[test]
fn invalid_configs_fail_at_construction() {
    let cases = [
        (
            SimulationConfig {
                track_length: -3,
                ..Default::default()
            },
            ConfigError::InvalidTrackLength(-3),
        ),
        (
            SimulationConfig {
                track_length: 5,
                obstacle_count: Some(6),
                ..SimulationConfig::with_actin()
            },
            ConfigError::InvalidObstacleCount {
                count: 6,
                track_length: 5,
            },
        ),
        (
            SimulationConfig {
                initial_atp: Some(-0.5),
                ..Default::default()
            },
            ConfigError::InvalidInitialAtp(-0.5),
        ),
        (
            SimulationConfig {
                binding_probability: 1.01,
                ..Default::default()
            },
            ConfigError::InvalidBindingProbability(1.01),
        ),
    ];

    for (config, expected) in cases {
        assert_eq!(TransportEngine::new(&config).unwrap_err(), expected);
        assert_eq!(run_transport_simulation(&config).unwrap_err(), expected);
    }
}
