pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::{ErrorKind, SimError, SimResult};

pub use simulation::states::{Body, SystemState, Trajectory, SimulationClock, NVec3};
pub use simulation::params::{Parameters, UnitSystem, G_AU_YR_MSUN, G_SI};
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity, pair_acceleration};
pub use simulation::integrator::{Integrator, IntegratorKind, ExplicitEuler, Rk4};
pub use simulation::simulator::{Simulator, Phase, sample_indices};
pub use simulation::scenario::Scenario;
pub use simulation::diagnostics::{center_of_mass, total_momentum, total_energy, relative_energy_error};

pub use configuration::config::{EngineConfig, ParametersConfig, BodyConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_gravity, bench_integrators};
