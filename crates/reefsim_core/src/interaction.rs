//! Pairwise interaction resolution.
//!
//! The rule table is checked in order, first match wins:
//!
//! 1. producer acting on consumer: predation
//! 2. same kind: competition
//! 3. consumer acting on producer: symbiosis
//!
//! Strengths are fixed per kind, not derived from species attributes. That
//! keeps the model tractable and every pairing reproducible.

use crate::config::InteractionStrengths;
use reefsim_data::{InteractionKind, Species, SpeciesInteraction, SpeciesKind};

/// Resolves the directed relationship `source` has toward `target`.
/// Pure, total, deterministic.
#[must_use]
pub fn resolve(
    source: &Species,
    target: &Species,
    strengths: &InteractionStrengths,
) -> (InteractionKind, f64) {
    match (source.kind, target.kind) {
        (SpeciesKind::Producer, SpeciesKind::Consumer) => {
            (InteractionKind::Predation, strengths.predation)
        }
        (a, b) if a == b => (InteractionKind::Competition, strengths.competition),
        _ => (InteractionKind::Symbiosis, strengths.symbiosis),
    }
}

/// Builds the full interaction set: one edge per ordered pair of distinct
/// species, so `n` species always yield `n * (n - 1)` edges.
#[must_use]
pub fn resolve_all(species: &[Species], strengths: &InteractionStrengths) -> Vec<SpeciesInteraction> {
    let mut interactions = Vec::with_capacity(species.len() * species.len().saturating_sub(1));
    for source in species {
        for target in species {
            if source.id == target.id {
                continue;
            }
            let (kind, strength) = resolve(source, target, strengths);
            interactions.push(SpeciesInteraction {
                source: source.id.clone(),
                target: target.id.clone(),
                kind,
                strength,
            });
        }
    }
    interactions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn producer(id: &str) -> Species {
        Species::new(id, id, SpeciesKind::Producer, 30.0, 0.5)
    }

    fn consumer(id: &str) -> Species {
        Species::new(id, id, SpeciesKind::Consumer, 30.0, 0.5)
    }

    #[test]
    fn producer_on_consumer_is_predation() {
        let strengths = InteractionStrengths::default();
        let (kind, strength) = resolve(&producer("p"), &consumer("c"), &strengths);
        assert_eq!(kind, InteractionKind::Predation);
        assert_eq!(strength, 0.8);
    }

    #[test]
    fn same_kind_is_competition() {
        let strengths = InteractionStrengths::default();
        let (kind, strength) = resolve(&producer("a"), &producer("b"), &strengths);
        assert_eq!(kind, InteractionKind::Competition);
        assert_eq!(strength, 0.5);

        let (kind, _) = resolve(&consumer("a"), &consumer("b"), &strengths);
        assert_eq!(kind, InteractionKind::Competition);
    }

    #[test]
    fn consumer_on_producer_is_symbiosis() {
        let strengths = InteractionStrengths::default();
        let (kind, strength) = resolve(&consumer("c"), &producer("p"), &strengths);
        assert_eq!(kind, InteractionKind::Symbiosis);
        assert_eq!(strength, 0.3);
    }

    #[test]
    fn resolve_all_yields_every_ordered_pair() {
        let species = vec![producer("a"), producer("b"), consumer("c"), consumer("d")];
        let interactions = resolve_all(&species, &InteractionStrengths::default());
        assert_eq!(interactions.len(), 4 * 3);
        assert!(interactions.iter().all(|i| i.source != i.target));
    }
}
