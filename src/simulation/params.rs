//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed step size and end time,
//! - gravitational constant `G` in the caller's unit system,
//! - how many snapshots to sample for output
//!
//! The engine only multiplies by `G`; picking units is up to the caller.
//! [`UnitSystem`] covers the common choices.

use serde::Deserialize;
use std::f64::consts::PI;

/// G in m^3 kg^-1 s^-2 (CODATA 2018)
pub const G_SI: f64 = 6.67430e-11;

/// G in AU^3 Msun^-1 yr^-2, i.e. 4 pi^2
pub const G_AU_YR_MSUN: f64 = 4.0 * PI * PI;

/// Unit systems with a known gravitational constant
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    #[serde(rename = "au_yr_msun")] // astronomical units, years, solar masses
    AuYearSolarMass,

    #[serde(rename = "si")] // metres, seconds, kilograms
    Si,

    #[serde(rename = "natural")] // G = 1
    Natural,
}

impl UnitSystem {
    pub fn gravitational_constant(self) -> f64 {
        match self {
            UnitSystem::AuYearSolarMass => G_AU_YR_MSUN,
            UnitSystem::Si => G_SI,
            UnitSystem::Natural => 1.0,
        }
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // time end
    pub dt: f64, // step size
    pub G: f64, // gravitational constant
    pub samples: Option<usize>, // snapshots to report, None = all
}
