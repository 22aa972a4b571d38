//! Error types for the engine stack.
//!
//! Validation outcomes are explicit values rather than panics or bare
//! booleans: every variant carries a machine-readable code, a human message
//! and a details payload with the offending measurements.

use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// A configuration or input the caller can correct. Never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("insufficient diversity: {actual} species, at least {required} required")]
    InsufficientDiversity { required: usize, actual: usize },

    #[error("too many species: {actual} exceeds the cap of {max}")]
    SpeciesLimitExceeded { max: usize, actual: usize },

    #[error("species id {id:?} appears more than once")]
    DuplicateSpeciesId { id: String },

    #[error("no producers among {consumers} consumer(s)")]
    NoProducers { producers: usize, consumers: usize },

    #[error("environmental stress {stress:.3} exceeds ceiling {ceiling:.3}")]
    HighEnvironmentalStress { stress: f64, ceiling: f64 },

    #[error("{field} = {value} outside allowed range [{min}, {max}]")]
    EnvironmentOutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl ValidationError {
    /// Stable machine-readable code for API consumers.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsufficientDiversity { .. } => "INSUFFICIENT_DIVERSITY",
            Self::SpeciesLimitExceeded { .. } => "SPECIES_LIMIT_EXCEEDED",
            Self::DuplicateSpeciesId { .. } => "DUPLICATE_SPECIES_ID",
            Self::NoProducers { .. } => "NO_PRODUCERS",
            Self::HighEnvironmentalStress { .. } => "HIGH_ENVIRONMENTAL_STRESS",
            Self::EnvironmentOutOfRange { .. } => "ENVIRONMENT_OUT_OF_RANGE",
        }
    }

    /// Offending measurements as a structured payload.
    #[must_use]
    pub fn details(&self) -> Value {
        match self {
            Self::InsufficientDiversity { required, actual } => {
                json!({ "required": required, "actual": actual })
            }
            Self::SpeciesLimitExceeded { max, actual } => {
                json!({ "max": max, "actual": actual })
            }
            Self::DuplicateSpeciesId { id } => json!({ "id": id }),
            Self::NoProducers {
                producers,
                consumers,
            } => json!({ "producers": producers, "consumers": consumers }),
            Self::HighEnvironmentalStress { stress, ceiling } => {
                json!({ "stress": stress, "ceiling": ceiling })
            }
            Self::EnvironmentOutOfRange {
                field,
                value,
                min,
                max,
            } => json!({ "field": field, "value": value, "min": min, "max": max }),
        }
    }
}

/// Caller logic errors against the attempt lifecycle. Not retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateConflict {
    #[error("simulation has not been initialized")]
    NotInitialized,

    #[error("attempt {0} has already been completed")]
    AlreadyCompleted(Uuid),

    #[error("attempt {0} still has time remaining")]
    TimeRemaining(Uuid),

    #[error("attempt {0} is unknown")]
    UnknownAttempt(Uuid),
}

/// Main error type for engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Terminal for the attempt: the run is over.
    #[error("time limit {limit:?} exceeded ({elapsed:?} elapsed)")]
    TimeLimitExceeded { limit: Duration, elapsed: Duration },

    #[error(transparent)]
    StateConflict(#[from] StateConflict),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
