//! Per-attempt ecosystem state machine.
//!
//! One engine owns exactly one [`EcosystemState`]; concurrent attempts get
//! their own instances. Phases are implicit: uninitialized until a
//! successful [`EcosystemEngine::initialize`], then active until the caller
//! stops stepping. Termination is a caller concern; the engine only refuses
//! to advance once the wall-clock time limit has elapsed.

use crate::config::EngineConfig;
use crate::error::{EngineError, Result, StateConflict, ValidationError};
use crate::{interaction, scoring};
use chrono::Utc;
use reefsim_data::{
    EcosystemState, EnvironmentParameters, SimulationContext, SimulationMetrics, SimulationResult,
    Species,
};
use std::time::Instant;
use uuid::Uuid;

pub struct EcosystemEngine {
    simulation_id: Uuid,
    context: SimulationContext,
    config: EngineConfig,
    state: Option<EcosystemState>,
    metrics: SimulationMetrics,
    started_at: Option<Instant>,
}

impl EcosystemEngine {
    pub fn new(context: SimulationContext, config: EngineConfig) -> Self {
        Self {
            simulation_id: Uuid::new_v4(),
            context,
            config,
            state: None,
            metrics: SimulationMetrics::default(),
            started_at: None,
        }
    }

    pub fn simulation_id(&self) -> Uuid {
        self.simulation_id
    }

    pub fn context(&self) -> &SimulationContext {
        &self.context
    }

    pub fn state(&self) -> Option<&EcosystemState> {
        self.state.as_ref()
    }

    pub fn metrics(&self) -> &SimulationMetrics {
        &self.metrics
    }

    /// Whether the configured time limit has elapsed since initialization.
    pub fn time_expired(&self) -> bool {
        self.started_at
            .is_some_and(|t| t.elapsed() > self.context.time_limit)
    }

    /// Replaces the engine's state wholesale: computes the full interaction
    /// set, the baseline metrics and the initial stability score, and resets
    /// the stability history to that single baseline entry.
    pub fn initialize(
        &mut self,
        species: Vec<Species>,
        environment: EnvironmentParameters,
    ) -> Result<&EcosystemState> {
        let min = self.config.validator.min_species;
        let max = self.config.validator.max_species;
        if species.len() < min {
            return Err(ValidationError::InsufficientDiversity {
                required: min,
                actual: species.len(),
            }
            .into());
        }
        if species.len() > max {
            return Err(ValidationError::SpeciesLimitExceeded {
                max,
                actual: species.len(),
            }
            .into());
        }
        if let Some(id) = crate::validator::duplicate_species_id(&species) {
            return Err(ValidationError::DuplicateSpeciesId { id: id.to_string() }.into());
        }
        if let Some((field, value, (lo, hi))) = environment.out_of_range_field() {
            return Err(ValidationError::EnvironmentOutOfRange {
                field,
                value,
                min: lo,
                max: hi,
            }
            .into());
        }

        let interactions = interaction::resolve_all(&species, &self.config.strengths);
        let mut state = EcosystemState {
            species,
            environment,
            interactions,
            stability_score: 0.0,
            timestamp: Utc::now(),
        };

        self.metrics = SimulationMetrics {
            species_diversity: scoring::species_diversity(&state.species),
            trophic_efficiency: scoring::trophic_efficiency(&state.interactions),
            environmental_stress: scoring::environmental_stress(&state.environment),
            stability_history: Vec::new(),
        };
        let score = self.composite_score(&state);
        state.stability_score = score;
        self.metrics.stability_history.push(score);

        tracing::info!(
            simulation_id = %self.simulation_id,
            species = state.species.len(),
            interactions = state.interactions.len(),
            stability = score,
            "Ecosystem initialized"
        );

        self.started_at = Some(Instant::now());
        Ok(self.state.insert(state))
    }

    /// Advances the simulation one tick.
    ///
    /// Each species gains base growth from its reproduction rate, pays for
    /// interactions it drives, benefits from interactions directed at it,
    /// and absorbs the environmental effect. Energy is floored at zero.
    pub fn step(&mut self) -> Result<()> {
        let Some(started_at) = self.started_at else {
            return Err(StateConflict::NotInitialized.into());
        };
        let elapsed = started_at.elapsed();
        if elapsed > self.context.time_limit {
            return Err(EngineError::TimeLimitExceeded {
                limit: self.context.time_limit,
                elapsed,
            });
        }
        let state = self
            .state
            .as_mut()
            .ok_or(StateConflict::NotInitialized)?;

        let rates = self.config.rates;
        let changes: Vec<f64> = state
            .species
            .iter()
            .map(|species| {
                let base_growth = species.reproduction_rate * rates.base_growth;

                // Acting as source costs energy, being acted upon benefits.
                let interaction_effect: f64 = state
                    .interactions
                    .iter()
                    .map(|i| {
                        if i.source == species.id {
                            -i.strength * rates.interaction_rate
                        } else if i.target == species.id {
                            i.strength * rates.interaction_rate
                        } else {
                            0.0
                        }
                    })
                    .sum();

                let env = &state.environment;
                let mut environmental_effect = -(env.temperature - rates.temperature_optimum)
                    .abs()
                    * rates.temperature_penalty
                    - (env.salinity - rates.salinity_optimum).abs() * rates.salinity_penalty;
                if species.is_producer() {
                    environmental_effect -= env.depth * rates.depth_penalty;
                    environmental_effect +=
                        (env.light_level - rates.light_midpoint) * rates.light_rate;
                }

                base_growth + interaction_effect + environmental_effect
            })
            .collect();

        for (species, change) in state.species.iter_mut().zip(changes) {
            species.energy_requirement = (species.energy_requirement + change).max(0.0);
        }

        self.metrics.species_diversity = scoring::species_diversity(&state.species);
        self.metrics.trophic_efficiency = scoring::trophic_efficiency(&state.interactions);
        self.metrics.environmental_stress = scoring::environmental_stress(&state.environment);

        let balance = scoring::interaction_balance(&state.interactions);
        let score = scoring::stability_score(
            self.metrics.species_diversity,
            self.metrics.trophic_efficiency,
            self.metrics.environmental_stress,
            balance,
            &self.config.weights,
        );
        state.stability_score = score;
        state.timestamp = Utc::now();
        self.metrics.stability_history.push(score);

        tracing::debug!(
            simulation_id = %self.simulation_id,
            tick = self.metrics.stability_history.len() - 1,
            stability = score,
            "Tick completed"
        );
        Ok(())
    }

    /// Recomputes the weighted composite from current metrics without
    /// mutating anything.
    pub fn current_score(&self) -> Result<f64> {
        let state = self.state.as_ref().ok_or(StateConflict::NotInitialized)?;
        Ok(self.composite_score(state))
    }

    /// Assembles the engine's own deterministic result record: composite
    /// score, latest stability, role balance, and threshold-based feedback.
    pub fn result(&self) -> Result<SimulationResult> {
        let state = self.state.as_ref().ok_or(StateConflict::NotInitialized)?;

        let mut feedback = Vec::new();
        let thresholds = self.config.thresholds;
        if self.metrics.species_diversity < thresholds.low_diversity {
            feedback.push(
                "Consider increasing species diversity for a more resilient ecosystem".to_string(),
            );
        }
        if self.metrics.trophic_efficiency < thresholds.low_trophic_efficiency {
            feedback
                .push("Energy transfer efficiency could be improved between species".to_string());
        }
        if self.metrics.environmental_stress > thresholds.high_stress {
            feedback.push(
                "Environmental stress is high; species may struggle to survive".to_string(),
            );
        }

        Ok(SimulationResult {
            simulation_id: self.simulation_id,
            score: self.composite_score(state),
            ecosystem_stability: self.metrics.latest_stability(),
            species_balance: scoring::species_balance(state),
            feedback,
            completed_at: Utc::now(),
        })
    }

    fn composite_score(&self, state: &EcosystemState) -> f64 {
        scoring::stability_score(
            self.metrics.species_diversity,
            self.metrics.trophic_efficiency,
            self.metrics.environmental_stress,
            scoring::interaction_balance(&state.interactions),
            &self.config.weights,
        )
    }
}
