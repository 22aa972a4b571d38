//! Evaluation of a finished attempt.
//!
//! The evaluator re-checks viability of the closing configuration, derives a
//! final weighted score over the run's final metrics, classifies the
//! stability trend, and asks the narrative collaborator for coaching text.
//! The narrative call is fail-soft: a collaborator failure never costs the
//! caller the numeric result.
//!
//! The [0, 1] `normalized_stability` here is a deliberately separate
//! calculation from the engine's [0, 100] composite; the two serve different
//! consumers and are never unified.

use crate::config::EngineConfig;
use crate::engine::EcosystemEngine;
use crate::error::{Result, StateConflict};
use crate::validator;
use reefsim_data::{
    EvaluationReport, SimulationMetrics, SpeciesInteraction, StabilityTrend,
};
use reefsim_observer::{FeedbackNarrator, FeedbackRequest};

/// Interactions this far from the middle of the strength range get called
/// out in the narrative prompt.
const NOTABLE_STRONG: f64 = 0.7;
const NOTABLE_WEAK: f64 = 0.3;

pub struct Evaluator {
    config: EngineConfig,
}

impl Evaluator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Scores one finished attempt and assembles the report.
    ///
    /// Fails with a `ValidationError` when the closing configuration was
    /// never viable; an attempt cannot be scored in that case.
    pub async fn evaluate(
        &self,
        engine: &EcosystemEngine,
        narrator: &dyn FeedbackNarrator,
    ) -> Result<EvaluationReport> {
        let state = engine.state().ok_or(StateConflict::NotInitialized)?;
        validator::validate(&state.species, &state.environment, &self.config.validator)?;

        let metrics = engine.metrics();
        let result = engine.result()?;

        let normalized_stability = self.normalized_stability(metrics);
        let complexity =
            (state.interactions.len() as f64 / max_interactions(&self.config) * 100.0)
                .clamp(0.0, 100.0);

        let w = self.config.evaluator;
        let final_score = (w.stability * metrics.latest_stability()
            + w.diversity * metrics.species_diversity
            + w.trophic_efficiency * metrics.trophic_efficiency
            + w.complexity * complexity)
            .clamp(0.0, 100.0);

        let trend = StabilityTrend::from_history(&metrics.stability_history);
        let prompt = build_prompt(metrics, trend, &state.interactions);

        let narrative = if engine.context().options.narrative_feedback {
            let request = FeedbackRequest {
                prompt,
                trend,
                stability: metrics.latest_stability(),
            };
            match narrator.narrate(&request).await {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::warn!(
                        simulation_id = %engine.simulation_id(),
                        error = %e,
                        "Narrative feedback failed; returning numeric result only"
                    );
                    None
                }
            }
        } else {
            None
        };

        Ok(EvaluationReport {
            simulation_id: engine.simulation_id(),
            final_score,
            normalized_stability,
            trend,
            result,
            narrative,
        })
    }

    /// Mean of the trailing history window, rescaled to [0, 1].
    fn normalized_stability(&self, metrics: &SimulationMetrics) -> f64 {
        let window = self.config.evaluator.history_window.max(1);
        let history = &metrics.stability_history;
        let tail = &history[history.len().saturating_sub(window)..];
        if tail.is_empty() {
            return 0.0;
        }
        (tail.iter().sum::<f64>() / tail.len() as f64 / 100.0).clamp(0.0, 1.0)
    }
}

fn max_interactions(config: &EngineConfig) -> f64 {
    let cap = config.validator.max_species as f64;
    (cap * (cap - 1.0)).max(1.0)
}

/// Builds the structured prompt the narrative collaborator receives:
/// final metrics, trend, and the interactions worth commenting on.
fn build_prompt(
    metrics: &SimulationMetrics,
    trend: StabilityTrend,
    interactions: &[SpeciesInteraction],
) -> String {
    let notable: Vec<String> = interactions
        .iter()
        .filter(|i| i.strength > NOTABLE_STRONG || i.strength < NOTABLE_WEAK)
        .map(|i| format!("{} -> {} ({:?}, strength {:.2})", i.source, i.target, i.kind, i.strength))
        .collect();

    let mut prompt = format!(
        "Ecosystem attempt summary:\n\
         - stability: {:.1}\n\
         - species diversity: {:.1}\n\
         - trophic efficiency: {:.1}\n\
         - environmental stress: {:.1}\n\
         - trend: {:?}\n",
        metrics.latest_stability(),
        metrics.species_diversity,
        metrics.trophic_efficiency,
        metrics.environmental_stress,
        trend,
    );
    if notable.is_empty() {
        prompt.push_str("No standout interactions.\n");
    } else {
        prompt.push_str("Notable interactions:\n");
        for line in &notable {
            prompt.push_str(line);
            prompt.push('\n');
        }
    }
    prompt.push_str("Write two sentences of coaching feedback for the student.");
    prompt
}
