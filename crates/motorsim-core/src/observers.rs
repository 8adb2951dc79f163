//! Observers - external consumers of the observation stream.
//!
//! The engine never prints. Anything that renders, records or charts a run
//! implements [`Observer`] and is handed each record as it is produced.

use std::io::{self, Write};

use serde::Serialize;

use crate::components::TrackKind;
use crate::observation::{Observation, RunState, StepDetail};

/// Receives every observation of a run, in order.
pub trait Observer {
    fn observe(&mut self, observation: &Observation);

    /// Called once after the last observation.
    fn finish(&mut self, _state: RunState) {}
}

impl Observer for Vec<Observation> {
    fn observe(&mut self, observation: &Observation) {
        self.push(observation.clone());
    }
}

/// Renders each step as human-readable lines.
///
/// The first write error is kept and every later write is skipped; check it
/// with [`TextLog::into_inner`].
pub struct TextLog<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TextLog<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn into_inner(self) -> io::Result<W> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }

    fn write_observation(&mut self, obs: &Observation) -> io::Result<()> {
        let step = obs.step;
        match &obs.detail {
            StepDetail::TugOfWar {
                position,
                direction,
            } => {
                let atp = obs
                    .motors
                    .iter()
                    .map(|m| format!("{} ATP: {}", m.name, m.atp_used))
                    .collect::<Vec<_>>()
                    .join(", ");
                let bound = obs
                    .motors
                    .iter()
                    .map(|m| format!("{} bound: {}", m.name, m.bound))
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(self.out, "Step {}: {}", step, atp)?;
                writeln!(self.out, "{}", bound)?;
                writeln!(self.out, "Position: {}, Direction: {}", position, direction)?;
            }
            StepDetail::MicrotubuleActin {
                microtubule, actin, ..
            } => {
                let cursors = [
                    (TrackKind::Microtubule, microtubule),
                    (TrackKind::Actin, actin),
                ];
                for (kind, cursor) in cursors {
                    if cursor.collision {
                        writeln!(
                            self.out,
                            "Step {}: Collision on {} at position {}, changing direction.",
                            step,
                            kind.label(),
                            cursor.position
                        )?;
                    }
                }
                let atp = obs
                    .motors
                    .iter()
                    .map(|m| format!("{}: {}", m.name, m.atp_used))
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(self.out, "Step {}: ATP consumed - {}", step, atp)?;
            }
            StepDetail::Halted => {
                writeln!(self.out, "ATP depleted! Motors stop.")?;
                return Ok(());
            }
        }
        if let Some(level) = obs.atp_level {
            writeln!(self.out, "Step {}: ATP level: {}", step, level)?;
        }
        Ok(())
    }
}

impl<W: Write> Observer for TextLog<W> {
    fn observe(&mut self, observation: &Observation) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.write_observation(observation) {
            self.error = Some(e);
        }
    }

    fn finish(&mut self, _state: RunState) {
        if self.error.is_none() {
            if let Err(e) = self.out.flush() {
                self.error = Some(e);
            }
        }
    }
}

/// Writes one JSON object per observation per line.
pub struct JsonLines<W: Write> {
    out: W,
    error: Option<serde_json::Error>,
}

impl<W: Write> JsonLines<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn into_inner(self) -> Result<W, serde_json::Error> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }

    fn write_line(&mut self, observation: &Observation) -> Result<(), serde_json::Error> {
        serde_json::to_writer(&mut self.out, observation)?;
        self.out.write_all(b"\n").map_err(serde_json::Error::io)
    }
}

impl<W: Write> Observer for JsonLines<W> {
    fn observe(&mut self, observation: &Observation) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.write_line(observation) {
            self.error = Some(e);
        }
    }

    fn finish(&mut self, _state: RunState) {
        if self.error.is_none() {
            if let Err(e) = self.out.flush() {
                self.error = Some(serde_json::Error::io(e));
            }
        }
    }
}

/// Cumulative ATP consumed by each motor after every executed step.
///
/// One point per executed step for each motor, suitable for charting ATP
/// consumption over time. Halt records add no point.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AtpSeries {
    names: Vec<String>,
    series: Vec<Vec<f64>>,
}

impl AtpSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Cumulative totals for the motor at `index`, one per step.
    pub fn series(&self, index: usize) -> Option<&[f64]> {
        self.series.get(index).map(Vec::as_slice)
    }

    /// Number of steps recorded.
    pub fn len(&self) -> usize {
        self.series.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Final cumulative total per motor.
    pub fn totals(&self) -> Vec<f64> {
        self.series
            .iter()
            .map(|s| s.last().copied().unwrap_or(0.0))
            .collect()
    }
}

impl Observer for AtpSeries {
    fn observe(&mut self, observation: &Observation) {
        if observation.is_halt() {
            return;
        }
        if self.names.is_empty() {
            self.names = observation.motors.iter().map(|m| m.name.clone()).collect();
            self.series = vec![Vec::new(); self.names.len()];
        }
        for (series, reading) in self.series.iter_mut().zip(&observation.motors) {
            series.push(reading.total_atp_used);
        }
    }
}
