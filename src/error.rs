//! Error types for the integration engine
//!
//! Every failure the core can produce is a [`SimError`]. Errors fall into four
//! groups (see [`ErrorKind`]): bad setup, degenerate geometry during a force
//! evaluation, calls made in the wrong order, and schemes that are recognised
//! but not implemented. Nothing in the core retries.

use thiserror::Error;

/// Result type for engine operations
pub type SimResult<T> = Result<T, SimError>;

/// Coarse classification of a [`SimError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid setup, fatal before any step is taken
    Configuration,
    /// Degenerate geometry or a non-finite state met while integrating
    Domain,
    /// Operation invoked out of order or with out-of-range arguments
    Precondition,
    /// Scheme is recognised by the selector but has no implementation
    Unimplemented,
}

/// Errors that can occur while configuring or running a simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("unknown integrator: {0:?} (expected one of: euler, rk4, whfast)")]
    UnknownIntegrator(String),

    #[error("integrator {0:?} is recognised but not implemented")]
    UnimplementedScheme(&'static str),

    #[error("body {index} has invalid mass {mass}: masses must be finite and positive")]
    InvalidMass { index: usize, mass: f64 },

    #[error("array lengths differ: {positions} positions, {velocities} velocities, {masses} masses")]
    LengthMismatch {
        positions: usize,
        velocities: usize,
        masses: usize,
    },

    #[error("{field} of body {index} must have 3 components, got {len}")]
    InvalidVector {
        index: usize,
        field: &'static str,
        len: usize,
    },

    #[error("non-finite {field} for body {index}")]
    NonFinite { index: usize, field: &'static str },

    #[error("time step must be finite and positive, got {0}")]
    InvalidTimeStep(f64),

    #[error("gravitational constant must be finite and positive, got {0}")]
    InvalidGravitationalConstant(f64),

    #[error("no gravitational constant: set either `G` or `units`")]
    MissingGravitationalConstant,

    #[error("bodies {i} and {j} occupy the same position")]
    CoincidentBodies { i: usize, j: usize },

    #[error("state became non-finite at step {step}")]
    NonFiniteState { step: u64 },

    #[error("ensemble is frozen once a run has started; call reset() first")]
    EnsembleFrozen,

    #[error("ensemble is empty")]
    EmptyEnsemble,

    #[error("target time must be finite and non-negative, got {0}")]
    InvalidTarget(f64),

    #[error("sample index {index} out of range for trajectory of length {len}")]
    SampleOutOfRange { index: usize, len: usize },
}

impl SimError {
    /// Which group of the taxonomy this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimError::UnknownIntegrator(_)
            | SimError::InvalidMass { .. }
            | SimError::LengthMismatch { .. }
            | SimError::InvalidVector { .. }
            | SimError::NonFinite { .. }
            | SimError::InvalidTimeStep(_)
            | SimError::InvalidGravitationalConstant(_)
            | SimError::MissingGravitationalConstant => ErrorKind::Configuration,

            SimError::CoincidentBodies { .. } | SimError::NonFiniteState { .. } => ErrorKind::Domain,

            SimError::EnsembleFrozen
            | SimError::EmptyEnsemble
            | SimError::InvalidTarget(_)
            | SimError::SampleOutOfRange { .. } => ErrorKind::Precondition,

            SimError::UnimplementedScheme(_) => ErrorKind::Unimplemented,
        }
    }
}
