//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integrator choice, parallel gravity, recentring
//! - [`ParametersConfig`] – step size, end time, gravitational constant
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! A Sun–Earth scenario in AU / years / solar masses:
//!
//! ```yaml
//! engine:
//!   integrator: "rk4"       # "euler", "rk4" ("whfast" is recognised but not implemented)
//!   parallel: false         # evaluate gravity rows on the rayon pool
//!   move_to_com: true       # recentre before running
//!   com_velocities: true    # also remove barycentric drift
//!
//! parameters:
//!   t_end: 1.0              # total simulation time
//!   dt: 0.001               # fixed step size
//!   units: au_yr_msun       # or `G: 39.478...`; an explicit G wins
//!   samples: 16             # snapshots to report (optional)
//!
//! bodies:
//!   - name: Sun
//!     x: [0.0, 0.0, 0.0]
//!     v: [0.0, 0.0, 0.0]
//!     m: 1.0
//!   - name: Earth
//!     x: [1.0, 0.0, 0.0]
//!     v: [0.0, 6.283185307179586, 0.0]
//!     m: 3.0e-6
//! ```
//!
//! The scenario builder maps this configuration onto runtime types and
//! validates it; nothing here is checked beyond what serde enforces.

use std::io::Read;

use serde::Deserialize;

use crate::simulation::params::UnitSystem;

fn default_true() -> bool {
    true
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub integrator: String, // Integrator name, parsed case-insensitively
    #[serde(default)]
    pub parallel: bool, // `true` - gravity rows are split across threads
    #[serde(default = "default_true")]
    pub move_to_com: bool, // Recentre positions on the barycenter before running
    #[serde(default = "default_true")]
    pub com_velocities: bool, // Remove barycentric velocity as well
}

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64, // time end
    pub dt: f64, // fixed step size
    #[serde(default)]
    pub G: Option<f64>, // gravitational constant, overrides `units`
    #[serde(default)]
    pub units: Option<UnitSystem>, // unit system to take G from
    #[serde(default)]
    pub samples: Option<usize>, // evenly spaced snapshots to report
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    #[serde(default)]
    pub name: Option<String>, // Identifier used in logs and output
    pub x: Vec<f64>, // Initial position vector `x` in simulation units
    pub v: Vec<f64>, // Initial velocity vector `v` in simulation units per time unit
    pub m: f64,      // Mass of the body
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // Engine-level configuration
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    pub bodies: Vec<BodyConfig>, // List of bodies that define the initial state of the system
}

impl ScenarioConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}
