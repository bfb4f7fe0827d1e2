//! Conserved quantities of a snapshot
//!
//! Used to check integrators (energy drift, momentum) and to recentre the
//! ensemble on its barycenter.

use super::states::{NVec3, SystemState};

/// Mass-weighted mean position and velocity
///
/// Returns zeros for an empty state.
pub fn center_of_mass(state: &SystemState) -> (NVec3, NVec3) {
    let total: f64 = state.masses.iter().sum();
    if total <= 0.0 {
        return (NVec3::zeros(), NVec3::zeros());
    }

    let mut x = NVec3::zeros();
    let mut v = NVec3::zeros();
    for ((xi, vi), &m) in state.positions.iter().zip(&state.velocities).zip(&state.masses) {
        x += *xi * m;
        v += *vi * m;
    }
    (x / total, v / total)
}

/// Sum of `m v` over all bodies
pub fn total_momentum(state: &SystemState) -> NVec3 {
    state
        .velocities
        .iter()
        .zip(&state.masses)
        .fold(NVec3::zeros(), |p, (v, &m)| p + *v * m)
}

/// Sum of `m v^2 / 2`
pub fn kinetic_energy(state: &SystemState) -> f64 {
    state
        .velocities
        .iter()
        .zip(&state.masses)
        .map(|(v, &m)| 0.5 * m * v.norm_squared())
        .sum()
}

/// Sum over pairs of `-G m_i m_j / r_ij`
///
/// Coincident pairs are skipped; the force model rejects them anyway.
pub fn potential_energy(state: &SystemState, g: f64) -> f64 {
    let n = state.len();
    let mut u = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let r = (state.positions[j] - state.positions[i]).norm();
            if r > 0.0 {
                u -= g * state.masses[i] * state.masses[j] / r;
            }
        }
    }
    u
}

pub fn total_energy(state: &SystemState, g: f64) -> f64 {
    kinetic_energy(state) + potential_energy(state, g)
}

/// `|E - E0| / |E0|`, or the absolute difference when `E0` is zero
pub fn relative_energy_error(initial: &SystemState, current: &SystemState, g: f64) -> f64 {
    let e0 = total_energy(initial, g);
    let e = total_energy(current, g);
    if e0 == 0.0 {
        (e - e0).abs()
    } else {
        ((e - e0) / e0).abs()
    }
}
