//! Pure scoring and metric functions.
//!
//! Every function here is total: empty collections degrade to defined
//! sentinel values through guarded divisors, never panics. All inputs are
//! snapshots; nothing in this module mutates state.

use crate::config::ScoringWeights;
use reefsim_data::{
    EcosystemState, EnvironmentParameters, InteractionKind, Species, SpeciesInteraction,
};

/// Role balance score: `producers * consumers / n^2 * 100`.
///
/// Zero whenever either role is absent; peaks at a 50/50 split.
#[must_use]
pub fn species_diversity(species: &[Species]) -> f64 {
    let n = species.len();
    let producers = species.iter().filter(|s| s.is_producer()).count();
    let consumers = n - producers;
    (producers * consumers) as f64 / (n * n).max(1) as f64 * 100.0
}

/// Mean predation strength scaled to [0, 100]; 0 when no predation exists.
#[must_use]
pub fn trophic_efficiency(interactions: &[SpeciesInteraction]) -> f64 {
    let predation: Vec<f64> = interactions
        .iter()
        .filter(|i| i.kind == InteractionKind::Predation)
        .map(|i| i.strength)
        .collect();
    let sum: f64 = predation.iter().sum();
    sum / predation.len().max(1) as f64 * 100.0
}

/// Mean of four normalized deviation factors, scaled to [0, 100].
#[must_use]
pub fn environmental_stress(env: &EnvironmentParameters) -> f64 {
    let factors = [
        (env.temperature - 20.0).abs() / 30.0,
        env.depth / 1000.0,
        env.salinity / 50.0,
        (100.0 - env.light_level) / 100.0,
    ];
    factors.iter().sum::<f64>() / factors.len() as f64 * 100.0
}

/// `(1 - sqrt(variance(strengths))) * 100`.
///
/// With at most one interaction the variance is undefined; the sentinel 100
/// reports a trivially balanced web.
#[must_use]
pub fn interaction_balance(interactions: &[SpeciesInteraction]) -> f64 {
    if interactions.len() <= 1 {
        return 100.0;
    }
    let n = interactions.len() as f64;
    let mean = interactions.iter().map(|i| i.strength).sum::<f64>() / n;
    let variance = interactions
        .iter()
        .map(|i| (i.strength - mean).powi(2))
        .sum::<f64>()
        / n;
    (1.0 - variance.sqrt()) * 100.0
}

/// Composite stability score, clamped to [0, 100].
///
/// The stress term is `100 - w * stress` rather than `w * (100 - stress)`;
/// the asymmetry is part of the scoring contract.
#[must_use]
pub fn stability_score(
    diversity: f64,
    trophic: f64,
    stress: f64,
    balance: f64,
    weights: &ScoringWeights,
) -> f64 {
    let raw = weights.diversity * diversity
        + weights.trophic_efficiency * trophic
        + (100.0 - weights.environmental_stress * stress)
        + weights.interaction_balance * balance;
    raw.clamp(0.0, 100.0)
}

/// How evenly energy is split between the two roles, in [0, 100].
#[must_use]
pub fn species_balance(state: &EcosystemState) -> f64 {
    let producer_energy: f64 = state
        .species
        .iter()
        .filter(|s| s.is_producer())
        .map(|s| s.energy_requirement)
        .sum();
    let consumer_energy: f64 = state
        .species
        .iter()
        .filter(|s| !s.is_producer())
        .map(|s| s.energy_requirement)
        .sum();
    // Floor the divisor so an all-zero ecosystem degrades instead of dividing
    // by zero.
    let total = (producer_energy + consumer_energy).max(1.0);
    (1.0 - (producer_energy - consumer_energy).abs() / total) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use reefsim_data::SpeciesKind;

    fn sp(kind: SpeciesKind, energy: f64) -> Species {
        Species::new("s", "s", kind, energy, 0.5)
    }

    fn edge(kind: InteractionKind, strength: f64) -> SpeciesInteraction {
        SpeciesInteraction {
            source: "a".into(),
            target: "b".into(),
            kind,
            strength,
        }
    }

    #[test]
    fn diversity_zero_without_consumers() {
        let species = vec![
            sp(SpeciesKind::Producer, 10.0),
            sp(SpeciesKind::Producer, 10.0),
            sp(SpeciesKind::Producer, 10.0),
        ];
        assert_eq!(species_diversity(&species), 0.0);
    }

    #[test]
    fn diversity_peaks_at_even_split() {
        let species = vec![
            sp(SpeciesKind::Producer, 10.0),
            sp(SpeciesKind::Producer, 10.0),
            sp(SpeciesKind::Consumer, 10.0),
            sp(SpeciesKind::Consumer, 10.0),
        ];
        assert_eq!(species_diversity(&species), 25.0);
    }

    #[test]
    fn diversity_handles_empty_list() {
        assert_eq!(species_diversity(&[]), 0.0);
    }

    #[test]
    fn trophic_efficiency_defaults_to_zero() {
        let interactions = vec![edge(InteractionKind::Competition, 0.5)];
        assert_eq!(trophic_efficiency(&interactions), 0.0);
        assert_eq!(trophic_efficiency(&[]), 0.0);
    }

    #[test]
    fn trophic_efficiency_averages_predation_only() {
        let interactions = vec![
            edge(InteractionKind::Predation, 0.8),
            edge(InteractionKind::Predation, 0.8),
            edge(InteractionKind::Symbiosis, 0.3),
        ];
        assert!((trophic_efficiency(&interactions) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn stress_zero_at_optimum() {
        let env = EnvironmentParameters {
            temperature: 20.0,
            depth: 0.0,
            salinity: 0.0,
            light_level: 100.0,
        };
        // Salinity 0 still contributes 0; all four factors vanish.
        assert_eq!(environmental_stress(&env), 0.0);
    }

    #[test]
    fn balance_sentinel_for_single_interaction() {
        let interactions = vec![edge(InteractionKind::Predation, 0.8)];
        assert_eq!(interaction_balance(&interactions), 100.0);
        assert_eq!(interaction_balance(&[]), 100.0);
    }

    #[test]
    fn balance_penalizes_spread() {
        let uniform = vec![
            edge(InteractionKind::Predation, 0.5),
            edge(InteractionKind::Predation, 0.5),
        ];
        let spread = vec![
            edge(InteractionKind::Predation, 0.1),
            edge(InteractionKind::Predation, 0.9),
        ];
        assert!(interaction_balance(&uniform) > interaction_balance(&spread));
    }

    #[test]
    fn stability_is_clamped() {
        let w = ScoringWeights::default();
        assert_eq!(stability_score(1000.0, 1000.0, -1000.0, 1000.0, &w), 100.0);
        assert_eq!(stability_score(-1000.0, -1000.0, 10000.0, -1000.0, &w), 0.0);
    }
}
