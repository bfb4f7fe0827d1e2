//! High-level runtime engine settings
//!
//! Selects the integrator, whether gravity is evaluated in parallel, and how
//! the ensemble is recentred before a run

use crate::simulation::integrator::IntegratorKind;

#[derive(Debug, Clone)]
pub struct Engine {
    pub integrator: IntegratorKind, // euler, rk4 (whfast is rejected)
    pub parallel: bool, // false = single thread, true = rayon rows
    pub move_to_com: bool, // recentre positions before the run
    pub com_velocities: bool, // also remove barycentric velocity
}
