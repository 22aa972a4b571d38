//! # Reefsim Core
//!
//! The simulation and evaluation engine behind the reef-ecosystem training
//! exercises. This crate contains the deterministic compute:
//!
//! - Interaction resolution between species pairs
//! - The per-attempt ecosystem engine (initialize / step / score / result)
//! - Pure scoring functions (diversity, trophic efficiency, stress, balance)
//! - Configuration viability validation
//! - The evaluator that assembles a finished attempt into a report
//!
//! Everything here is single-threaded synchronous compute; the only async
//! boundary is the evaluator's call to the narrative feedback collaborator
//! in `reefsim_observer`.
//!
//! ## Example
//!
//! ```
//! use reefsim_core::config::EngineConfig;
//! use reefsim_core::engine::EcosystemEngine;
//! use reefsim_data::{EnvironmentParameters, SimulationContext, Species, SpeciesKind};
//! use std::time::Duration;
//!
//! let context = SimulationContext::new("demo-user", Duration::from_secs(300));
//! let mut engine = EcosystemEngine::new(context, EngineConfig::default());
//! let species = vec![
//!     Species::new("kelp", "Giant Kelp", SpeciesKind::Producer, 40.0, 0.6),
//!     Species::new("urchin", "Purple Urchin", SpeciesKind::Consumer, 25.0, 0.4),
//!     Species::new("otter", "Sea Otter", SpeciesKind::Consumer, 60.0, 0.2),
//! ];
//! engine
//!     .initialize(species, EnvironmentParameters::default())
//!     .unwrap();
//! engine.step().unwrap();
//! let score = engine.current_score().unwrap();
//! assert!((0.0..=100.0).contains(&score));
//! ```

/// Tuning configuration for every numeric knob of the engine
pub mod config;
/// Per-attempt ecosystem state machine
pub mod engine;
/// Error taxonomy shared across the engine stack
pub mod error;
/// Attempt evaluation and narrative prompt assembly
pub mod evaluator;
/// Pairwise interaction resolution
pub mod interaction;
/// Pure scoring and metric functions
pub mod scoring;
/// Tick counters and structured logging setup
pub mod telemetry;
/// Configuration viability rules
pub mod validator;

pub use config::EngineConfig;
pub use engine::EcosystemEngine;
pub use error::{EngineError, Result, StateConflict, ValidationError};
pub use evaluator::Evaluator;
pub use telemetry::{init_logging, Telemetry};
