//! Tuning configuration for the engine.
//!
//! Every numeric knob of the simulation lives here as a strongly-typed
//! structure mapping to `config.toml`. Defaults encode the reference model;
//! operators can retune scoring without touching code.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [weights]
//! diversity = 0.3
//! trophic_efficiency = 0.3
//! environmental_stress = 0.2
//! interaction_balance = 0.2
//!
//! [rates]
//! base_growth = 0.1
//! interaction_rate = 0.05
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Weights of the composite stability score.
///
/// The environmental stress term enters as `100 - w * stress`, not
/// `w * (100 - stress)`; historical scores depend on that shape, so it is
/// kept as-is.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub diversity: f64,
    pub trophic_efficiency: f64,
    pub environmental_stress: f64,
    pub interaction_balance: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            diversity: 0.3,
            trophic_efficiency: 0.3,
            environmental_stress: 0.2,
            interaction_balance: 0.2,
        }
    }
}

/// Per-tick energy update rates and environmental optima.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct StepRates {
    /// Scales `reproduction_rate` into base growth per tick.
    pub base_growth: f64,
    /// Scales interaction strength into energy transfer per tick.
    pub interaction_rate: f64,
    pub temperature_optimum: f64,
    pub salinity_optimum: f64,
    /// Energy lost per degree away from the temperature optimum.
    pub temperature_penalty: f64,
    /// Energy lost per meter of depth (producers only).
    pub depth_penalty: f64,
    /// Energy lost per salinity unit away from the optimum.
    pub salinity_penalty: f64,
    /// Energy gained per light percent above the midpoint (producers only).
    pub light_rate: f64,
    pub light_midpoint: f64,
}

impl Default for StepRates {
    fn default() -> Self {
        Self {
            base_growth: 0.1,
            interaction_rate: 0.05,
            temperature_optimum: 20.0,
            salinity_optimum: 35.0,
            temperature_penalty: 0.01,
            depth_penalty: 0.001,
            salinity_penalty: 0.01,
            light_rate: 0.01,
            light_midpoint: 50.0,
        }
    }
}

/// Fixed interaction strengths per resolved kind.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct InteractionStrengths {
    pub predation: f64,
    pub competition: f64,
    pub symbiosis: f64,
}

impl Default for InteractionStrengths {
    fn default() -> Self {
        Self {
            predation: 0.8,
            competition: 0.5,
            symbiosis: 0.3,
        }
    }
}

/// Thresholds for the engine's deterministic feedback messages.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct FeedbackThresholds {
    pub low_diversity: f64,
    pub low_trophic_efficiency: f64,
    pub high_stress: f64,
}

impl Default for FeedbackThresholds {
    fn default() -> Self {
        Self {
            low_diversity: 50.0,
            low_trophic_efficiency: 60.0,
            high_stress: 70.0,
        }
    }
}

/// Viability rules enforced before (and after) a run.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct ValidatorConfig {
    pub min_species: usize,
    pub max_species: usize,
    /// Configuration stress above this is not viable, in [0, 1].
    pub stress_ceiling: f64,
    /// Energy requirement at which species fragility reaches one half.
    pub fragility_half_point: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_species: 3,
            max_species: 10,
            stress_ceiling: 0.8,
            fragility_half_point: 25.0,
        }
    }
}

/// Weights for the evaluator's final score over the run's final metrics.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct EvaluatorWeights {
    pub stability: f64,
    pub diversity: f64,
    pub trophic_efficiency: f64,
    pub complexity: f64,
    /// How many trailing history entries feed the normalized estimate.
    pub history_window: usize,
}

impl Default for EvaluatorWeights {
    fn default() -> Self {
        Self {
            stability: 0.4,
            diversity: 0.2,
            trophic_efficiency: 0.2,
            complexity: 0.2,
            history_window: 10,
        }
    }
}

/// Top-level engine configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    pub weights: ScoringWeights,
    pub rates: StepRates,
    pub strengths: InteractionStrengths,
    pub thresholds: FeedbackThresholds,
    pub validator: ValidatorConfig,
    pub evaluator: EvaluatorWeights,
}

impl EngineConfig {
    /// Loads `config.toml` from the working directory, writing the defaults
    /// out when the file is missing or unreadable.
    pub fn load() -> Self {
        Self::load_from(Path::new("config.toml"))
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(content) = fs::read_to_string(path) {
            if let Ok(config) = toml::from_str(&content) {
                return config;
            }
        }
        let default = Self::default();
        if let Ok(rendered) = toml::to_string(&default) {
            let _ = fs::write(path, rendered);
        }
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let w = ScoringWeights::default();
        let sum = w.diversity + w.trophic_efficiency + w.environmental_stress + w.interaction_balance;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = EngineConfig::default();
        let rendered = toml::to_string(&config).unwrap();
        let parsed: EngineConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.validator.max_species, config.validator.max_species);
        assert_eq!(parsed.strengths.predation, config.strengths.predation);
    }
}
