//! Shared value types for the reef simulation engine.
//!
//! Pure data: every type here is serde-serializable and carries no behavior
//! beyond constructors and small accessors. Mutation of simulation state is
//! the exclusive business of `reefsim_core`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// The two trophic roles a species can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpeciesKind {
    Producer,
    Consumer,
}

/// One species in a configuration.
///
/// `energy_requirement` doubles as the per-tick population/vigor proxy the
/// engine mutates; `reproduction_rate` is static for the life of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: String,
    pub name: String,
    pub kind: SpeciesKind,
    pub energy_requirement: f64,
    pub reproduction_rate: f64,
}

impl Species {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: SpeciesKind,
        energy_requirement: f64,
        reproduction_rate: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            energy_requirement,
            reproduction_rate,
        }
    }

    pub fn is_producer(&self) -> bool {
        self.kind == SpeciesKind::Producer
    }
}

/// Immutable environment snapshot for one simulation.
///
/// Replacing it means re-initializing the engine: interactions and the
/// baseline score are derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentParameters {
    /// Degrees Celsius, valid range [-10, 40]. Optimum 20.
    pub temperature: f64,
    /// Meters, valid range [0, 1000].
    pub depth: f64,
    /// Practical salinity units, valid range [0, 50]. Optimum 35.
    pub salinity: f64,
    /// Percent of surface light, valid range [0, 100].
    pub light_level: f64,
}

impl EnvironmentParameters {
    pub const TEMPERATURE_RANGE: (f64, f64) = (-10.0, 40.0);
    pub const DEPTH_RANGE: (f64, f64) = (0.0, 1000.0);
    pub const SALINITY_RANGE: (f64, f64) = (0.0, 50.0);
    pub const LIGHT_RANGE: (f64, f64) = (0.0, 100.0);

    /// Field-by-field range check; returns the first offending field.
    pub fn out_of_range_field(&self) -> Option<(&'static str, f64, (f64, f64))> {
        let checks = [
            ("temperature", self.temperature, Self::TEMPERATURE_RANGE),
            ("depth", self.depth, Self::DEPTH_RANGE),
            ("salinity", self.salinity, Self::SALINITY_RANGE),
            ("light_level", self.light_level, Self::LIGHT_RANGE),
        ];
        checks
            .into_iter()
            .find(|(_, v, (lo, hi))| !(*lo..=*hi).contains(v))
    }
}

impl Default for EnvironmentParameters {
    fn default() -> Self {
        Self {
            temperature: 20.0,
            depth: 0.0,
            salinity: 35.0,
            light_level: 100.0,
        }
    }
}

/// Directed relationship classes between two species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InteractionKind {
    Predation,
    Competition,
    Symbiosis,
}

/// A directed edge of the food web: `source` acts on `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesInteraction {
    pub source: String,
    pub target: String,
    pub kind: InteractionKind,
    /// Always in [0, 1] by construction.
    pub strength: f64,
}

/// Rolling metrics snapshot, refreshed after every tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetrics {
    pub species_diversity: f64,
    pub trophic_efficiency: f64,
    pub environmental_stress: f64,
    /// One entry per completed tick plus the baseline; never truncated.
    pub stability_history: Vec<f64>,
}

impl SimulationMetrics {
    /// Last recorded stability score, or 0 before initialization.
    pub fn latest_stability(&self) -> f64 {
        self.stability_history.last().copied().unwrap_or(0.0)
    }
}

/// The aggregate the engine owns exclusively. Consumers get clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcosystemState {
    pub species: Vec<Species>,
    pub environment: EnvironmentParameters,
    pub interactions: Vec<SpeciesInteraction>,
    /// Composite health score, clamped to [0, 100].
    pub stability_score: f64,
    pub timestamp: DateTime<Utc>,
}

impl EcosystemState {
    pub fn producer_count(&self) -> usize {
        self.species.iter().filter(|s| s.is_producer()).count()
    }

    pub fn consumer_count(&self) -> usize {
        self.species.len() - self.producer_count()
    }
}

/// Closed set of per-run options actually consumed by the engine stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOptions {
    /// When false the evaluator skips the narrative collaborator entirely.
    pub narrative_feedback: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            narrative_feedback: true,
        }
    }
}

/// Immutable per-attempt execution context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationContext {
    pub user_id: String,
    pub time_limit: Duration,
    pub options: SimulationOptions,
}

impl SimulationContext {
    pub fn new(user_id: impl Into<String>, time_limit: Duration) -> Self {
        Self {
            user_id: user_id.into(),
            time_limit,
            options: SimulationOptions::default(),
        }
    }
}

/// Direction of the stability curve over the last two recorded ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StabilityTrend {
    Improving,
    Declining,
    Stable,
}

impl StabilityTrend {
    /// Classifies the delta between the last two history entries.
    pub fn from_history(history: &[f64]) -> Self {
        match history {
            [.., prev, last] => {
                let delta = last - prev;
                if delta > 0.1 {
                    StabilityTrend::Improving
                } else if delta < -0.1 {
                    StabilityTrend::Declining
                } else {
                    StabilityTrend::Stable
                }
            }
            _ => StabilityTrend::Stable,
        }
    }
}

/// Outbound result record for one finished simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub simulation_id: Uuid,
    pub score: f64,
    pub ecosystem_stability: f64,
    pub species_balance: f64,
    pub feedback: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

/// The evaluator's assembled verdict on one finished attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub simulation_id: Uuid,
    /// Weighted composite over the run's final metrics, in [0, 100].
    pub final_score: f64,
    /// Independent [0, 1] stability estimate; deliberately not the engine's
    /// composite rescaled.
    pub normalized_stability: f64,
    pub trend: StabilityTrend,
    pub result: SimulationResult,
    /// Narrative text from the external collaborator; `None` when the
    /// collaborator failed or was disabled. Never blocks the numeric result.
    pub narrative: Option<String>,
}
