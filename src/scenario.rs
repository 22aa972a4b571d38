//! Scenario files: a species roster plus an environment, loadable from TOML.
//!
//! ## Example `scenario.toml`
//!
//! ```toml
//! [environment]
//! temperature = 18.0
//! depth = 12.0
//! salinity = 34.0
//! light_level = 85.0
//!
//! [[species]]
//! id = "kelp"
//! name = "Giant Kelp"
//! kind = "PRODUCER"
//! energy_requirement = 40.0
//! reproduction_rate = 0.6
//! ```

use anyhow::Context;
use reefsim_data::{EnvironmentParameters, Species, SpeciesKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub species: Vec<Species>,
    pub environment: EnvironmentParameters,
}

impl Scenario {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading scenario file {}", path.display()))?;
        let scenario = toml::from_str(&content)
            .with_context(|| format!("parsing scenario file {}", path.display()))?;
        Ok(scenario)
    }

    /// Built-in kelp forest roster used when no scenario file is given.
    pub fn sample() -> Self {
        Self {
            species: vec![
                Species::new("kelp", "Giant Kelp", SpeciesKind::Producer, 40.0, 0.6),
                Species::new("algae", "Coralline Algae", SpeciesKind::Producer, 18.0, 0.8),
                Species::new("urchin", "Purple Urchin", SpeciesKind::Consumer, 25.0, 0.4),
                Species::new("otter", "Sea Otter", SpeciesKind::Consumer, 60.0, 0.2),
            ],
            environment: EnvironmentParameters {
                temperature: 16.0,
                depth: 15.0,
                salinity: 34.0,
                light_level: 80.0,
            },
        }
    }
}
