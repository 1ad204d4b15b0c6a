//! Error types for vsim.
//!
//! Only configuration can fail. Degenerate geometry and capacity exhaustion
//! are handled inside the solver and never surface as errors.

use thiserror::Error;

/// A rejected solver configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("sub-step count must be at least 1")]
    NoSubSteps,

    #[error("constraint radius must be finite and positive, got {0}")]
    ConstraintRadius(f64),

    #[error("radius bounds must satisfy 0 <= min <= max, got [{min}, {max}]")]
    RadiusBounds { min: f64, max: f64 },

    #[error("particles of radius {max_radius} do not fit inside a container of radius {constraint_radius}")]
    ParticleTooLarge { max_radius: f64, constraint_radius: f64 },

    #[error("spawn spacing must be finite and non-negative, got {0}")]
    SpawnSpacing(f64),

    #[error("{0} must have finite components")]
    NonFinite(&'static str),

    #[error("capacity {requested} is below the {active} particles already admitted")]
    CapacityBelowActive { requested: usize, active: usize },
}
