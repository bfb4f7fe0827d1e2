//! Time loop over a fixed ensemble
//!
//! The `Simulator` owns the bodies, the clock and the trajectory. Bodies can
//! be added (and recentred) while it is `Configured`; the first `run` freezes
//! the ensemble until `reset`.
//!
//! `run(target)` takes whole steps of `dt` until `t >= target`. It never
//! shortens the last step, so a target that is not a multiple of `dt` is
//! overshot by less than one step.

use log::{debug, info, trace};

use super::diagnostics::center_of_mass;
use super::forces::{AccelSet, NewtonianGravity};
use super::integrator::{Integrator, IntegratorKind};
use super::states::{Body, SimulationClock, SystemState, Trajectory};
use crate::error::{SimError, SimResult};

/// Lifecycle of a [`Simulator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting bodies, nothing recorded yet
    Configured,
    /// At least one `run` since construction or the last `reset`
    Running,
}

pub struct Simulator {
    bodies: Vec<Body>, // initial conditions, untouched by integration
    integrator: Box<dyn Integrator>,
    forces: AccelSet,
    clock: SimulationClock,
    trajectory: Trajectory,
    phase: Phase,
}

impl Simulator {
    /// Simulator with direct-sum Newtonian gravity
    pub fn new(kind: IntegratorKind, dt: f64, g: f64) -> SimResult<Self> {
        if !(g.is_finite() && g > 0.0) {
            return Err(SimError::InvalidGravitationalConstant(g));
        }
        let forces = AccelSet::new().with(NewtonianGravity::new(g));
        Self::with_forces(kind.build()?, dt, forces)
    }

    /// Simulator with a caller-supplied integrator and force set
    pub fn with_forces(integrator: Box<dyn Integrator>, dt: f64, forces: AccelSet) -> SimResult<Self> {
        Ok(Self {
            bodies: Vec::new(),
            integrator,
            forces,
            clock: SimulationClock::new(dt)?,
            trajectory: Trajectory::new(),
            phase: Phase::Configured,
        })
    }

    /// Append a body to the ensemble
    pub fn add(&mut self, body: Body) -> SimResult<()> {
        if self.phase == Phase::Running {
            return Err(SimError::EnsembleFrozen);
        }
        body.validate(self.bodies.len())?;
        debug!("adding body {} ({:?}, m = {})", self.bodies.len(), body.name, body.m);
        self.bodies.push(body);
        Ok(())
    }

    /// Shift the ensemble so its barycenter sits at the origin
    ///
    /// With `include_velocities` the barycentric velocity is removed as well,
    /// so the barycenter stays put during the run.
    pub fn move_to_center_of_mass(&mut self, include_velocities: bool) -> SimResult<()> {
        if self.phase == Phase::Running {
            return Err(SimError::EnsembleFrozen);
        }
        if self.bodies.is_empty() {
            return Err(SimError::EmptyEnsemble);
        }

        let (com_x, com_v) = center_of_mass(&SystemState::from_bodies(0.0, &self.bodies));
        for b in self.bodies.iter_mut() {
            b.x -= com_x;
            if include_velocities {
                b.v -= com_v;
            }
        }
        debug!("moved to center of mass: dx = {:?}, dv = {:?}", -com_x, -com_v);
        Ok(())
    }

    /// Advance until `t >= target` and return the full trajectory
    ///
    /// The first call records the initial snapshot before stepping. Later
    /// calls continue from the last recorded snapshot; a target that has
    /// already been reached is a no-op.
    pub fn run(&mut self, target: f64) -> SimResult<&Trajectory> {
        if !(target.is_finite() && target >= 0.0) {
            return Err(SimError::InvalidTarget(target));
        }
        if self.bodies.is_empty() {
            return Err(SimError::EmptyEnsemble);
        }

        if self.trajectory.is_empty() {
            self.trajectory.push(SystemState::from_bodies(self.clock.t(), &self.bodies));
        }
        self.phase = Phase::Running;

        let dt = self.clock.dt();
        let total = self.clock.steps_to_reach(target);
        let start = self.clock.step();
        if start < total {
            info!(
                "running {} bodies with {} from t = {} to t = {} ({} steps of {})",
                self.bodies.len(),
                self.integrator.name(),
                self.clock.t(),
                total as f64 * dt,
                total - start,
                dt
            );
        }

        while self.clock.step() < total {
            let mut next = match self.trajectory.last() {
                Some(prev) => self.integrator.step(dt, prev, &self.forces)?,
                None => return Err(SimError::EmptyEnsemble),
            };

            let step = self.clock.step() + 1;
            if !next.is_finite() {
                return Err(SimError::NonFiniteState { step });
            }

            self.clock.advance();
            next.t = self.clock.t();
            trace!("step {} t = {}", step, next.t);
            self.trajectory.push(next);
        }

        if start < total {
            info!("reached t = {} with {} snapshots", self.clock.t(), self.trajectory.len());
        }
        Ok(&self.trajectory)
    }

    /// Drop the trajectory and zero the clock; the ensemble is kept
    pub fn reset(&mut self) {
        self.trajectory.clear();
        self.clock.reset();
        self.phase = Phase::Configured;
        debug!("simulator reset");
    }

    /// Recorded snapshots at `indices`, in the order given
    pub fn sample(&self, indices: &[usize]) -> SimResult<Vec<&SystemState>> {
        let len = self.trajectory.len();
        indices
            .iter()
            .map(|&index| {
                self.trajectory
                    .get(index)
                    .ok_or(SimError::SampleOutOfRange { index, len })
            })
            .collect()
    }

    /// `n` snapshots spread evenly over the trajectory, first and last included
    pub fn sample_evenly(&self, n: usize) -> Vec<&SystemState> {
        sample_indices(n, self.trajectory.len())
            .into_iter()
            .filter_map(|i| self.trajectory.get(i))
            .collect()
    }

    pub fn time(&self) -> f64 {
        self.clock.t()
    }

    pub fn dt(&self) -> f64 {
        self.clock.dt()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Latest recorded snapshot, or the initial one if nothing has run yet
    pub fn current_state(&self) -> SystemState {
        match self.trajectory.last() {
            Some(state) => state.clone(),
            None => SystemState::from_bodies(self.clock.t(), &self.bodies),
        }
    }

    pub fn integrator_name(&self) -> &'static str {
        self.integrator.name()
    }
}

/// `n` evenly spaced indices into a sequence of length `len`
///
/// Always includes the first and last index when `n >= 2`. Asking for more
/// samples than there are entries returns every index.
pub fn sample_indices(n: usize, len: usize) -> Vec<usize> {
    if n == 0 || len == 0 {
        return Vec::new();
    }
    if n >= len {
        return (0..len).collect();
    }
    if n == 1 {
        return vec![0];
    }
    (0..n).map(|i| i * (len - 1) / (n - 1)).collect()
}
