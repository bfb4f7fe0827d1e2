//! Fixed-step time integrators for the N-body system
//!
//! Provides explicit Euler and classical RK4, both driven by `AccelSet`.
//! Integrators never mutate their input: `step` reads a frozen snapshot and
//! returns the snapshot one `dt` later.
//!
//! New schemes plug in by implementing [`Integrator`] and adding a variant to
//! [`IntegratorKind`].

use std::fmt;
use std::str::FromStr;

use super::forces::AccelSet;
use super::states::{NVec3, SystemState};
use crate::error::{SimError, SimResult};

/// A fixed-step integration scheme
pub trait Integrator: Send + Sync {
    /// Advance `state` by `dt` and return the new snapshot
    fn step(&self, dt: f64, state: &SystemState, forces: &AccelSet) -> SimResult<SystemState>;

    /// Short name of the scheme
    fn name(&self) -> &'static str;

    /// Global order of accuracy
    fn order(&self) -> usize;

    /// Force evaluations per step
    fn evaluations_per_step(&self) -> usize;
}

/// Reject bad input before any arithmetic happens
fn check_step(dt: f64, state: &SystemState) -> SimResult<()> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(SimError::InvalidTimeStep(dt));
    }
    state.validate()
}

/// `base + h * k`, element-wise
fn offset(base: &[NVec3], k: &[NVec3], h: f64) -> Vec<NVec3> {
    base.iter().zip(k.iter()).map(|(b, k)| *b + *k * h).collect()
}

/// Explicit Euler, one force evaluation per step
///
/// ```text
/// v' = v + dt * a(x)
/// x' = x + dt * v'
/// ```
///
/// First order. Energy drifts without bound; use it as a baseline or for
/// short runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn step(&self, dt: f64, state: &SystemState, forces: &AccelSet) -> SimResult<SystemState> {
        check_step(dt, state)?;

        // a_n from x_n
        let acc = forces.accelerations(state)?;

        // v_n+1 = v_n + dt * a_n
        let velocities = offset(&state.velocities, &acc, dt);

        // x_n+1 = x_n + dt * v_n+1
        let positions = offset(&state.positions, &velocities, dt);

        Ok(SystemState {
            t: state.t + dt,
            positions,
            velocities,
            masses: state.masses.clone(),
        })
    }

    fn name(&self) -> &'static str {
        "euler"
    }

    fn order(&self) -> usize {
        1
    }

    fn evaluations_per_step(&self) -> usize {
        1
    }
}

/// Classical 4th-order Runge–Kutta over the coupled system
/// `dx/dt = v`, `dv/dt = a(x)`
///
/// Four force evaluations per step. Each intermediate stage is a full
/// snapshot whose velocities are the next stage's position slopes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rk4;

impl Rk4 {
    /// Stage snapshot `(x + h * kx, v + h * kv)` at `t + h`
    fn stage(state: &SystemState, kx: &[NVec3], kv: &[NVec3], h: f64) -> SystemState {
        SystemState {
            t: state.t + h,
            positions: offset(&state.positions, kx, h),
            velocities: offset(&state.velocities, kv, h),
            masses: state.masses.clone(),
        }
    }
}

impl Integrator for Rk4 {
    fn step(&self, dt: f64, state: &SystemState, forces: &AccelSet) -> SimResult<SystemState> {
        check_step(dt, state)?;
        let half_dt = 0.5 * dt;

        // k1 at (x, v)
        let k1_v = forces.accelerations(state)?;
        let k1_x = &state.velocities;

        // k2 at (x + dt/2 k1_x, v + dt/2 k1_v)
        let s2 = Self::stage(state, k1_x, &k1_v, half_dt);
        let k2_v = forces.accelerations(&s2)?;
        let k2_x = s2.velocities;

        // k3 at (x + dt/2 k2_x, v + dt/2 k2_v)
        let s3 = Self::stage(state, &k2_x, &k2_v, half_dt);
        let k3_v = forces.accelerations(&s3)?;
        let k3_x = s3.velocities;

        // k4 at (x + dt k3_x, v + dt k3_v)
        let s4 = Self::stage(state, &k3_x, &k3_v, dt);
        let k4_v = forces.accelerations(&s4)?;
        let k4_x = s4.velocities;

        let sixth = dt / 6.0;
        let n = state.len();
        let mut positions = Vec::with_capacity(n);
        let mut velocities = Vec::with_capacity(n);
        for i in 0..n {
            positions.push(state.positions[i] + sixth * (k1_x[i] + 2.0 * k2_x[i] + 2.0 * k3_x[i] + k4_x[i]));
            velocities.push(state.velocities[i] + sixth * (k1_v[i] + 2.0 * k2_v[i] + 2.0 * k3_v[i] + k4_v[i]));
        }

        Ok(SystemState {
            t: state.t + dt,
            positions,
            velocities,
            masses: state.masses.clone(),
        })
    }

    fn name(&self) -> &'static str {
        "rk4"
    }

    fn order(&self) -> usize {
        4
    }

    fn evaluations_per_step(&self) -> usize {
        4
    }
}

/// Integrator selected by name
///
/// `WhFast` is reserved for a symplectic Wisdom–Holman scheme. It parses, so
/// configurations naming it are recognised, but [`IntegratorKind::build`]
/// refuses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorKind {
    Euler,
    Rk4,
    WhFast,
}

impl IntegratorKind {
    /// Instantiate the scheme
    pub fn build(self) -> SimResult<Box<dyn Integrator>> {
        match self {
            IntegratorKind::Euler => Ok(Box::new(ExplicitEuler)),
            IntegratorKind::Rk4 => Ok(Box::new(Rk4)),
            IntegratorKind::WhFast => Err(SimError::UnimplementedScheme("whfast")),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IntegratorKind::Euler => "euler",
            IntegratorKind::Rk4 => "rk4",
            IntegratorKind::WhFast => "whfast",
        }
    }
}

impl FromStr for IntegratorKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euler" => Ok(IntegratorKind::Euler),
            "rk4" => Ok(IntegratorKind::Rk4),
            "whfast" => Ok(IntegratorKind::WhFast),
            _ => Err(SimError::UnknownIntegrator(s.to_string())),
        }
    }
}

impl fmt::Display for IntegratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
