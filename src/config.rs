use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level hmmgen configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HmmgenConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// HMM parameter tables.
    pub model: ModelToml,

    /// Simulation settings.
    #[serde(default)]
    pub simulation: SimulationToml,
}

/// Parameter tables, written row by row as in matrix notation.
///
/// `transition[i][j]` is P(next = i | current = j) and
/// `emission[k][j]` is P(obs = k | state = j), so columns are distributions.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    pub transition: Vec<Vec<f64>>,
    pub emission: Vec<Vec<f64>>,
    pub prior: Vec<f64>,
    #[serde(default = "default_true")]
    pub validate_distributions: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationToml {
    #[serde(default = "default_steps")]
    pub steps: usize,
    #[serde(default = "default_runs")]
    pub runs: usize,
}

impl Default for SimulationToml {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            runs: default_runs(),
        }
    }
}

fn default_steps() -> usize {
    100
}
fn default_runs() -> usize {
    1
}

/// Reads and parses a TOML configuration file.
pub fn load(path: &Path) -> Result<HmmgenConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}
