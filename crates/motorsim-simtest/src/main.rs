//! motorsim Headless Simulation Harness
//!
//! Runs the preset transport scenarios in-process and checks the engine's
//! bookkeeping invariants. Can also run a single JSON config and print its
//! observation stream.
//!
//! Usage:
//!   cargo run -p motorsim-simtest
//!   cargo run -p motorsim-simtest -- --verbose
//!   cargo run -p motorsim-simtest -- --config run.json [--json]

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use motorsim_core::config::validate_config;
use motorsim_core::prelude::*;

// ── Errors ──────────────────────────────────────────────────────────────

#[derive(Debug)]
enum HarnessError {
    Io(io::Error),
    Json(serde_json::Error),
    Config(ConfigError),
    Usage(String),
}

impl From<io::Error> for HarnessError {
    fn from(e: io::Error) -> Self {
        HarnessError::Io(e)
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(e: serde_json::Error) -> Self {
        HarnessError::Json(e)
    }
}

impl From<ConfigError> for HarnessError {
    fn from(e: ConfigError) -> Self {
        HarnessError::Config(e)
    }
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarnessError::Io(e) => write!(f, "IO error: {}", e),
            HarnessError::Json(e) => write!(f, "JSON error: {}", e),
            HarnessError::Config(e) => write!(f, "Invalid configuration: {}", e),
            HarnessError::Usage(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for HarnessError {}

// ── Arguments ───────────────────────────────────────────────────────────

struct Args {
    verbose: bool,
    json: bool,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Args, HarnessError> {
    let mut args = Args {
        verbose: false,
        json: false,
        config: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--verbose" => args.verbose = true,
            "--json" => args.json = true,
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| HarnessError::Usage("--config needs a path".into()))?;
                args.config = Some(PathBuf::from(path));
            }
            other => return Err(HarnessError::Usage(format!("unknown argument: {}", other))),
        }
    }
    Ok(args)
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn check(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    if args.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .format_timestamp(None)
            .init();
    }

    if let Some(path) = &args.config {
        if let Err(e) = run_config(path, args.json) {
            eprintln!("{}", e);
            std::process::exit(2);
        }
        return;
    }

    println!("=== motorsim Transport Harness ===\n");

    let mut results = Vec::new();

    // 1. Tug-of-war reference run
    results.extend(validate_tug_of_war(args.verbose));

    // 2. ATP bookkeeping
    results.extend(validate_atp_bookkeeping());

    // 3. Energy-constrained run
    results.extend(validate_energy_budget());

    // 4. Microtubule + actin with crowding
    results.extend(validate_crowding());

    // 5. Seed determinism
    results.extend(validate_determinism());

    // 6. Construction errors
    results.extend(validate_config_errors());

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        results.len(),
        failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

/// Run one JSON config and stream it to stdout.
fn run_config(path: &Path, json: bool) -> Result<(), HarnessError> {
    let text = std::fs::read_to_string(path)?;
    let config: SimulationConfig = serde_json::from_str(&text)?;
    let mut engine = TransportEngine::new(&config)?;

    let stdout = io::stdout();
    if json {
        let mut sink = JsonLines::new(stdout.lock());
        engine.run_with(&mut sink);
        sink.into_inner()?;
    } else {
        let mut sink = TextLog::new(stdout.lock());
        let state = engine.run_with(&mut sink);
        let mut out = sink.into_inner()?;
        writeln!(out, "Final state: {:?} after {} steps", state, engine.steps_taken())?;
    }
    Ok(())
}

fn run_or_report(name: &str, config: &SimulationConfig) -> Result<Vec<Observation>, TestResult> {
    run_transport_simulation(config)
        .map_err(|e| TestResult::check(name, false, format!("config rejected: {}", e)))
}

// ── 1. Tug-of-war ───────────────────────────────────────────────────────

fn validate_tug_of_war(verbose: bool) -> Vec<TestResult> {
    println!("--- Tug-of-War (kinesin vs dynein) ---");
    let mut results = Vec::new();

    let config = SimulationConfig::tug_of_war();
    let mut engine = match TransportEngine::new(&config) {
        Ok(engine) => engine,
        Err(e) => {
            results.push(TestResult::check("tow_construct", false, e.to_string()));
            return results;
        }
    };

    let observations = if verbose {
        let mut text = TextLog::new(io::stdout());
        let mut recorded: Vec<Observation> = Vec::new();
        while let Some(obs) = engine.step() {
            text.observe(&obs);
            recorded.observe(&obs);
        }
        text.finish(engine.state());
        recorded
    } else {
        engine.run_to_end()
    };

    results.push(TestResult::check(
        "tow_step_count",
        observations.len() == config.steps as usize,
        format!("{} observations for {} steps", observations.len(), config.steps),
    ));

    results.push(TestResult::check(
        "tow_completed",
        engine.state() == RunState::Completed,
        format!("final state {:?}", engine.state()),
    ));

    // Direction follows the resolution rule every step
    let mut previous = Direction::Plus;
    let mut violations = 0;
    for obs in &observations {
        let expected = if obs.motors[0].bound {
            Direction::Plus
        } else if obs.motors[1].bound {
            Direction::Minus
        } else {
            previous
        };
        if obs.direction() != Some(expected) {
            violations += 1;
        }
        previous = expected;
    }
    results.push(TestResult::check(
        "tow_direction_rule",
        violations == 0,
        format!("{} direction violations", violations),
    ));

    // Net displacement at the cursor equals the sum of signed steps
    let step_sizes: Vec<f64> = engine.motors().iter().map(Motor::step_size).collect();
    let expected_net: f64 = observations
        .iter()
        .map(|o| {
            let sign = o.direction().map_or(0.0, Direction::sign);
            let a = if o.motors[0].bound { step_sizes[0] } else { 0.0 };
            let b = if o.motors[1].bound { step_sizes[1] } else { 0.0 };
            (a - b) * sign
        })
        .sum();
    let recorded = engine
        .track(TrackKind::Microtubule)
        .and_then(|t| t.displacement_at(config.microtubule_start()))
        .unwrap_or(f64::NAN);
    results.push(TestResult::check(
        "tow_displacement_ledger",
        (recorded - expected_net).abs() < 1e-9,
        format!("cursor displacement {} (expected {})", recorded, expected_net),
    ));

    results
}

// ── 2. ATP bookkeeping ──────────────────────────────────────────────────

fn validate_atp_bookkeeping() -> Vec<TestResult> {
    println!("--- ATP Bookkeeping ---");
    let mut results = Vec::new();

    let config = SimulationConfig {
        motors: vec![
            MotorSpec::kinesin().with_atp_cost(1.5),
            MotorSpec::dynein().with_atp_cost(2.0),
            MotorSpec::myosin().with_atp_cost(0.5),
        ],
        steps: 200,
        binding_probability: 0.6,
        ..SimulationConfig::with_actin()
    };
    let observations = match run_or_report("atp_run", &config) {
        Ok(obs) => obs,
        Err(r) => {
            results.push(r);
            return results;
        }
    };

    let costs: Vec<f64> = config.motors.iter().map(|m| m.atp_cost).collect();
    let mut totals = vec![0.0; costs.len()];
    let mut bad_steps = 0;
    for obs in &observations {
        for (i, reading) in obs.motors.iter().enumerate() {
            let expected = if reading.bound { costs[i] } else { 0.0 };
            totals[i] += expected;
            if reading.atp_used != expected || (reading.total_atp_used - totals[i]).abs() > 1e-9 {
                bad_steps += 1;
            }
        }
    }
    results.push(TestResult::check(
        "atp_charged_once_per_bound_step",
        bad_steps == 0,
        format!("{} mismatched motor-steps over {} steps", bad_steps, observations.len()),
    ));

    let mut series = AtpSeries::new();
    for obs in &observations {
        series.observe(obs);
    }
    results.push(TestResult::check(
        "atp_series_totals",
        series.totals() == totals,
        format!("series totals {:?}", series.totals()),
    ));

    results
}

// ── 3. Energy budget ────────────────────────────────────────────────────

fn validate_energy_budget() -> Vec<TestResult> {
    println!("--- Energy-Constrained Run (ATP 200) ---");
    let mut results = Vec::new();

    let config = SimulationConfig {
        steps: 500,
        ..SimulationConfig::energy_constrained()
    };
    let mut engine = match TransportEngine::new(&config) {
        Ok(engine) => engine,
        Err(e) => {
            results.push(TestResult::check("energy_construct", false, e.to_string()));
            return results;
        }
    };
    let observations = engine.run_to_end();

    let levels: Vec<f64> = observations.iter().filter_map(|o| o.atp_level).collect();
    let non_negative = levels.iter().all(|l| *l >= 0.0);
    let monotone = levels.windows(2).all(|w| w[1] <= w[0]);
    results.push(TestResult::check(
        "energy_level_floor_and_monotone",
        non_negative && monotone,
        format!(
            "{} levels, final {}",
            levels.len(),
            levels.last().copied().unwrap_or_default()
        ),
    ));

    let halts = observations.iter().filter(|o| o.is_halt()).count();
    let halt_last = observations.last().map_or(false, |o| o.is_halt());
    results.push(TestResult::check(
        "energy_halts_once_at_end",
        halts == 1 && halt_last && engine.state() == RunState::HaltedAtpDepleted,
        format!("{} halt records, state {:?}", halts, engine.state()),
    ));

    let before = engine.steps_taken();
    let resumed = engine.step().is_some();
    results.push(TestResult::check(
        "energy_no_steps_after_halt",
        !resumed && engine.steps_taken() == before,
        format!("halted after {} steps", before),
    ));

    results
}

// ── 4. Crowding ─────────────────────────────────────────────────────────

fn validate_crowding() -> Vec<TestResult> {
    println!("--- Microtubule + Actin with Crowding ---");
    let mut results = Vec::new();

    let config = SimulationConfig::with_actin();
    let mut engine = match TransportEngine::new(&config) {
        Ok(engine) => engine,
        Err(e) => {
            results.push(TestResult::check("crowding_construct", false, e.to_string()));
            return results;
        }
    };

    let counts = [TrackKind::Microtubule, TrackKind::Actin]
        .map(|kind| engine.obstacles(kind).map_or(0, ObstacleField::len));
    results.push(TestResult::check(
        "crowding_obstacle_counts",
        counts.iter().all(|c| *c as i64 == config.obstacle_count.unwrap_or(0)),
        format!("obstacles per track {:?}", counts),
    ));

    let hits = [TrackKind::Microtubule, TrackKind::Actin].map(|kind| {
        let position = engine.position(kind).unwrap_or(-1);
        engine
            .obstacles(kind)
            .map_or(false, |field| field.check_collision(position))
    });

    let mut previous = engine.direction();
    let mut violations = 0;
    for obs in engine.by_ref() {
        if let StepDetail::MicrotubuleActin {
            microtubule,
            actin,
            direction,
        } = obs.detail
        {
            let mt_expected = if hits[0] { -previous } else { previous };
            let actin_expected = if hits[1] { -mt_expected } else { mt_expected };
            if microtubule.collision != hits[0]
                || actin.collision != hits[1]
                || microtubule.direction != mt_expected
                || actin.direction != actin_expected
                || direction != actin_expected
            {
                violations += 1;
            }
            previous = direction;
        } else {
            violations += 1;
        }
    }
    results.push(TestResult::check(
        "crowding_flip_rule",
        violations == 0,
        format!(
            "{} violations (microtubule hit: {}, actin hit: {})",
            violations, hits[0], hits[1]
        ),
    ));

    results
}

// ── 5. Determinism ──────────────────────────────────────────────────────

fn validate_determinism() -> Vec<TestResult> {
    println!("--- Seed Determinism ---");
    let mut results = Vec::new();

    for (name, config) in [
        ("determinism_tug_of_war", SimulationConfig::tug_of_war()),
        ("determinism_energy", SimulationConfig::energy_constrained()),
        ("determinism_actin", SimulationConfig::with_actin()),
    ] {
        let a = run_transport_simulation(&config);
        let b = run_transport_simulation(&config);
        let same = matches!((&a, &b), (Ok(a), Ok(b)) if a == b);
        results.push(TestResult::check(
            name,
            same,
            format!("seed {} reproduces its stream", config.seed),
        ));
    }

    results
}

// ── 6. Configuration errors ─────────────────────────────────────────────

fn validate_config_errors() -> Vec<TestResult> {
    println!("--- Configuration Errors ---");

    let cases = [
        (
            "config_negative_track",
            SimulationConfig {
                track_length: -1,
                ..Default::default()
            },
        ),
        (
            "config_too_many_obstacles",
            SimulationConfig {
                track_length: 10,
                obstacle_count: Some(11),
                ..SimulationConfig::with_actin()
            },
        ),
        (
            "config_negative_atp",
            SimulationConfig {
                initial_atp: Some(-1.0),
                ..Default::default()
            },
        ),
        (
            "config_bad_probability",
            SimulationConfig {
                binding_probability: 1.2,
                ..Default::default()
            },
        ),
    ];

    cases
        .into_iter()
        .map(|(name, config)| {
            let errors = validate_config(&config);
            let rejected = TransportEngine::new(&config).is_err();
            TestResult::check(
                name,
                rejected && !errors.is_empty(),
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })
        .collect()
}
