//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - a `Simulator` with every body added and, if asked, recentred
//!
//! All validation of the configuration happens here, before any step.

use log::info;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::{SimError, SimResult};
use crate::simulation::engine::Engine;
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::params::Parameters;
use crate::simulation::simulator::Simulator;
use crate::simulation::states::{Body, NVec3};

/// Fully-initialized simulation, ready to `run`
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub simulator: Simulator,
}

/// Map a 3-element list onto a vector
fn vec3(index: usize, field: &'static str, values: &[f64]) -> SimResult<NVec3> {
    match values {
        [x, y, z] => Ok(NVec3::new(*x, *y, *z)),
        _ => Err(SimError::InvalidVector { index, field, len: values.len() }),
    }
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        // Engine (runtime) from EngineConfig
        let engine = Engine {
            integrator: cfg.engine.integrator.parse()?,
            parallel: cfg.engine.parallel,
            move_to_com: cfg.engine.move_to_com,
            com_velocities: cfg.engine.com_velocities,
        };

        // Parameters (runtime) from ParametersConfig, explicit G before units
        let p_cfg = cfg.parameters;
        let g = match (p_cfg.G, p_cfg.units) {
            (Some(g), _) => g,
            (None, Some(units)) => units.gravitational_constant(),
            (None, None) => return Err(SimError::MissingGravitationalConstant),
        };
        if !(g.is_finite() && g > 0.0) {
            return Err(SimError::InvalidGravitationalConstant(g));
        }
        if !(p_cfg.t_end.is_finite() && p_cfg.t_end >= 0.0) {
            return Err(SimError::InvalidTarget(p_cfg.t_end));
        }
        let parameters = Parameters {
            t_end: p_cfg.t_end,
            dt: p_cfg.dt,
            G: g,
            samples: p_cfg.samples,
        };

        // Forces: construct an AccelSet and register Newtonian gravity
        let forces = AccelSet::new().with(NewtonianGravity::new(parameters.G).parallel(engine.parallel));
        let mut simulator = Simulator::with_forces(engine.integrator.build()?, parameters.dt, forces)?;

        // Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors
        for (i, bc) in cfg.bodies.iter().enumerate() {
            let BodyConfig { name, x, v, m } = bc;
            simulator.add(Body {
                name: name.clone(),
                x: vec3(i, "x", x)?,
                v: vec3(i, "v", v)?,
                m: *m,
            })?;
        }

        if engine.move_to_com {
            simulator.move_to_center_of_mass(engine.com_velocities)?;
        }

        info!(
            "built scenario: {} bodies, integrator {}, dt = {}, t_end = {}, G = {}",
            simulator.bodies().len(),
            engine.integrator,
            parameters.dt,
            parameters.t_end,
            parameters.G
        );

        Ok(Self {
            engine,
            parameters,
            simulator,
        })
    }

    /// Run to `t_end`
    pub fn run(&mut self) -> SimResult<()> {
        self.simulator.run(self.parameters.t_end)?;
        Ok(())
    }
}
