//! Core state types for the N-body simulation.
//!
//! - `Body`           one point mass as added to the ensemble
//! - `SystemState`    the whole ensemble at one instant, as parallel arrays
//! - `Trajectory`     append-only history of snapshots, one per step
//! - `SimulationClock` step counter that derives `t = k * dt`
//!
//! Everything is `f64`; a snapshot cannot hold mixed precision.

use nalgebra::Vector3;
use serde::Serialize;

use crate::error::{SimError, SimResult};

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: Option<String>, // optional identifier
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub m: f64, // mass
}

impl Body {
    pub fn new(m: f64, x: NVec3, v: NVec3) -> Self {
        Self { name: None, x, v, m }
    }

    pub fn named(name: impl Into<String>, m: f64, x: NVec3, v: NVec3) -> Self {
        Self { name: Some(name.into()), x, v, m }
    }

    /// Check mass and coordinates of a body that would sit at `index`
    pub fn validate(&self, index: usize) -> SimResult<()> {
        check_mass(index, self.m)?;
        check_finite(index, "position", &self.x)?;
        check_finite(index, "velocity", &self.v)
    }
}

/// Snapshot of the ensemble at time `t`
///
/// Index `i` in `positions`, `velocities` and `masses` always refers to the
/// same body, in every snapshot of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemState {
    pub t: f64, // time
    pub positions: Vec<NVec3>,
    pub velocities: Vec<NVec3>,
    pub masses: Vec<f64>,
}

impl SystemState {
    /// Build a snapshot from parallel arrays, rejecting anything that breaks
    /// the snapshot invariants
    pub fn from_arrays(t: f64, positions: Vec<NVec3>, velocities: Vec<NVec3>, masses: Vec<f64>) -> SimResult<Self> {
        let state = Self { t, positions, velocities, masses };
        state.validate()?;
        Ok(state)
    }

    /// Snapshot of `bodies` at `t`
    pub fn from_bodies(t: f64, bodies: &[Body]) -> Self {
        Self {
            t,
            positions: bodies.iter().map(|b| b.x).collect(),
            velocities: bodies.iter().map(|b| b.v).collect(),
            masses: bodies.iter().map(|b| b.m).collect(),
        }
    }

    /// Equal array lengths, positive finite masses, finite coordinates
    pub fn validate(&self) -> SimResult<()> {
        let n = self.masses.len();
        if self.positions.len() != n || self.velocities.len() != n {
            return Err(SimError::LengthMismatch {
                positions: self.positions.len(),
                velocities: self.velocities.len(),
                masses: n,
            });
        }
        for (i, &m) in self.masses.iter().enumerate() {
            check_mass(i, m)?;
            check_finite(i, "position", &self.positions[i])?;
            check_finite(i, "velocity", &self.velocities[i])?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// True when every position and velocity component is finite
    pub fn is_finite(&self) -> bool {
        self.positions
            .iter()
            .chain(self.velocities.iter())
            .all(|p| p.iter().all(|c| c.is_finite()))
    }
}

fn check_mass(index: usize, mass: f64) -> SimResult<()> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidMass { index, mass })
    }
}

fn check_finite(index: usize, field: &'static str, vec: &NVec3) -> SimResult<()> {
    if vec.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(SimError::NonFinite { index, field })
    }
}

/// Ordered history of snapshots, indexed by step number
///
/// Only the simulator appends; nothing is ever modified in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trajectory {
    states: Vec<SystemState>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    pub(crate) fn push(&mut self, state: SystemState) {
        self.states.push(state);
    }

    pub(crate) fn clear(&mut self) {
        self.states.clear();
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, step: usize) -> Option<&SystemState> {
        self.states.get(step)
    }

    pub fn last(&self) -> Option<&SystemState> {
        self.states.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SystemState> {
        self.states.iter()
    }

    pub fn states(&self) -> &[SystemState] {
        &self.states
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a SystemState;
    type IntoIter = std::slice::Iter<'a, SystemState>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

/// Fixed-step clock
///
/// Time is derived from the step count rather than accumulated, so
/// `t_k = k * dt` holds for every recorded step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    dt: f64,
    step: u64,
}

impl SimulationClock {
    pub fn new(dt: f64) -> SimResult<Self> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::InvalidTimeStep(dt));
        }
        Ok(Self { dt, step: 0 })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn t(&self) -> f64 {
        self.step as f64 * self.dt
    }

    /// Number of steps from zero needed to reach `target`
    ///
    /// The small tolerance keeps `target = k * dt` from rounding up to `k + 1`
    /// steps; other targets round up and overshoot by less than one `dt`.
    pub fn steps_to_reach(&self, target: f64) -> u64 {
        let steps = (target / self.dt - 1e-9).ceil();
        if steps > 0.0 { steps as u64 } else { 0 }
    }

    pub fn advance(&mut self) {
        self.step += 1;
    }

    pub fn reset(&mut self) {
        self.step = 0;
    }
}
