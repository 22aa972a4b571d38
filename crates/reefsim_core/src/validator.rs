//! Configuration viability rules.
//!
//! Independent of the live engine: these checks gate whether a configuration
//! is worth simulating at all, and the evaluator re-runs them against the
//! closing state before scoring an attempt.

use crate::config::ValidatorConfig;
use crate::error::ValidationError;
use reefsim_data::{EnvironmentParameters, Species};
use std::collections::HashSet;

/// First species id that appears more than once, if any. Ids are declared
/// unique within a configuration; a duplicate would silently shrink the
/// interaction set and double-count energy transfers.
pub fn duplicate_species_id(species: &[Species]) -> Option<&str> {
    let mut seen = HashSet::new();
    species
        .iter()
        .map(|s| s.id.as_str())
        .find(|id| !seen.insert(*id))
}

/// Checks the viability rules in order; the first violation wins.
pub fn validate(
    species: &[Species],
    environment: &EnvironmentParameters,
    config: &ValidatorConfig,
) -> Result<(), ValidationError> {
    if species.len() < config.min_species {
        return Err(ValidationError::InsufficientDiversity {
            required: config.min_species,
            actual: species.len(),
        });
    }

    if let Some(id) = duplicate_species_id(species) {
        return Err(ValidationError::DuplicateSpeciesId { id: id.to_string() });
    }

    let producers = species.iter().filter(|s| s.is_producer()).count();
    if producers == 0 {
        return Err(ValidationError::NoProducers {
            producers: 0,
            consumers: species.len(),
        });
    }

    let stress = configuration_stress(species, environment, config);
    if stress > config.stress_ceiling {
        return Err(ValidationError::HighEnvironmentalStress {
            stress,
            ceiling: config.stress_ceiling,
        });
    }

    Ok(())
}

/// Stress the configured species would experience in this environment,
/// in [0, 1].
///
/// Unlike the scoring module's fixed-optima stress, this uses the species'
/// own attributes: environmental exposure is scaled by how fragile the
/// roster is, where fragility grows with energy requirement and shrinks
/// with reproduction rate.
pub fn configuration_stress(
    species: &[Species],
    environment: &EnvironmentParameters,
    config: &ValidatorConfig,
) -> f64 {
    let exposure = (environment.temperature.abs() / 40.0
        + environment.depth / 1000.0
        + environment.salinity / 50.0
        + (100.0 - environment.light_level) / 100.0)
        / 4.0;

    let fragility_sum: f64 = species
        .iter()
        .map(|s| {
            let demand = s.energy_requirement / (s.energy_requirement + config.fragility_half_point);
            demand * (1.0 - s.reproduction_rate.clamp(0.0, 1.0))
        })
        .sum();
    let fragility = fragility_sum / species.len().max(1) as f64;

    (exposure * fragility).clamp(0.0, 1.0)
}
