//! Force / acceleration contributors for the n-body engine
//!
//! Defines the acceleration trait, the set that sums several terms, and
//! direct-summation Newtonian gravity. Coincident bodies are a domain error
//! here, for every integrator, instead of being masked as zero force or
//! left to produce infinities.

use rayon::prelude::*;

use crate::error::{SimError, SimResult};
use crate::simulation::states::{NVec3, SystemState};

/// Collection of acceleration terms (gravity, drag, etc.)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all bodies in `state`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, state: &SystemState, out: &mut [NVec3]) -> SimResult<()> {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        // Iterate over all acceleration contributors
        for term in &self.terms {
            term.acceleration(state, out)?;
        }
        Ok(())
    }

    /// Allocating form of [`AccelSet::accumulate_accels`]
    pub fn accelerations(&self, state: &SystemState) -> SimResult<Vec<NVec3>> {
        let mut out = vec![NVec3::zeros(); state.len()];
        self.accumulate_accels(state, &mut out)?;
        Ok(out)
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for acceleration sources operating on a [`SystemState`]
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, state: &SystemState, out: &mut [NVec3]) -> SimResult<()>;
}

/// Acceleration of a body at `xi` caused by a body of mass `mj` at `xj`
///
/// `G * mj / |r|^2` along the unit vector from `xi` to `xj`. The mass of the
/// attracted body does not appear.
pub fn pair_acceleration(g: f64, xi: &NVec3, xj: &NVec3, mj: f64) -> Option<NVec3> {
    let r = xj - xi;
    let dist = r.norm();
    if dist == 0.0 || !dist.is_finite() {
        return None;
    }
    let r_hat = r / dist;
    Some((g * mj / (dist * dist)) * r_hat)
}

/// Newtonian gravity, direct n^2 sum without softening
///
/// Each row `i` sums over `j` in ascending order, so the result does not
/// depend on `parallel`: rows are independent and computed from the same
/// frozen snapshot either way.
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub parallel: bool, // split rows across the rayon pool
}

impl NewtonianGravity {
    pub fn new(g: f64) -> Self {
        Self { G: g, parallel: false }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Net acceleration on body `i` from every other body
    fn row(&self, i: usize, state: &SystemState) -> SimResult<NVec3> {
        let xi = &state.positions[i];
        let mut acc = NVec3::zeros();

        for (j, (xj, &mj)) in state.positions.iter().zip(state.masses.iter()).enumerate() {
            // no self-interaction
            if j == i {
                continue;
            }
            match pair_acceleration(self.G, xi, xj, mj) {
                Some(a) => acc += a,
                None => return Err(degenerate_pair(i, j, xi, xj)),
            }
        }
        Ok(acc)
    }
}

fn degenerate_pair(i: usize, j: usize, xi: &NVec3, xj: &NVec3) -> SimError {
    if (xj - xi).norm() == 0.0 {
        SimError::CoincidentBodies { i: i.min(j), j: i.max(j) }
    } else if xi.iter().all(|c| c.is_finite()) {
        SimError::NonFinite { index: j, field: "position" }
    } else {
        SimError::NonFinite { index: i, field: "position" }
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, state: &SystemState, out: &mut [NVec3]) -> SimResult<()> {
        let n = state.len();
        if n == 0 { // No bodies, return
            return Ok(());
        }

        if self.parallel {
            let rows: Vec<NVec3> = (0..n)
                .into_par_iter()
                .map(|i| self.row(i, state))
                .collect::<SimResult<_>>()?;
            for (a, row) in out.iter_mut().zip(rows) {
                *a += row;
            }
        } else {
            for (i, a) in out.iter_mut().enumerate().take(n) {
                *a += self.row(i, state)?;
            }
        }
        Ok(())
    }
}
