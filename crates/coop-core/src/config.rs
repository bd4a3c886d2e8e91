//! Configuration System
//!
//! Loads simulation parameters from tuning.toml for easy adjustment without
//! recompiling. Every section and key is optional; missing values fall back to
//! the defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use coop_events::{Choice, CHROMOSOME_LEN};

use crate::error::ConfigError;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub population: PopulationConfig,
    pub interaction: InteractionConfig,
    pub payoff: PayoffConfig,
    pub mutation: MutationConfig,
}

/// Run-level parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Rounds per run
    pub rounds: u64,
    /// Independent replicate runs; run k is seeded with seed + k
    pub runs: u32,
    pub seed: u64,
    /// Directory receiving one round table per run
    pub output_dir: PathBuf,
    /// Also write a JSON summary with the final population
    pub write_summary: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rounds: 1000,
            runs: 1,
            seed: 42,
            output_dir: PathBuf::from("output"),
            write_summary: true,
        }
    }
}

/// Population sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Agents per group
    pub size: usize,
    /// Agents culled (and bred back) per group each round
    pub cull_count: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: 50,
            cull_count: 20,
        }
    }
}

/// Opponent sampling and strategy expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Opponents drawn from each group per acting agent
    pub sample_size: usize,
    /// Relative pull of each chromosome locus when choosing a move
    pub locus_weights: [u32; CHROMOSOME_LEN],
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            sample_size: 20,
            locus_weights: [8, 4, 2, 1],
        }
    }
}

/// Score deltas for the acting agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffConfig {
    /// Both cooperate
    pub reward: f64,
    /// Actor defects against a cooperator
    pub temptation: f64,
    /// Actor cooperates against a defector
    pub sucker: f64,
    /// Both defect
    pub punishment: f64,
}

impl Default for PayoffConfig {
    fn default() -> Self {
        Self {
            reward: 5.0,
            temptation: 0.0,
            sucker: -5.0,
            punishment: 0.0,
        }
    }
}

impl PayoffConfig {
    /// Score awarded to an actor playing `own` against `other`
    pub fn payoff(&self, own: Choice, other: Choice) -> f64 {
        match (own, other) {
            (Choice::Cooperate, Choice::Cooperate) => self.reward,
            (Choice::Defect, Choice::Cooperate) => self.temptation,
            (Choice::Cooperate, Choice::Defect) => self.sucker,
            (Choice::Defect, Choice::Defect) => self.punishment,
        }
    }
}

/// Per-bit mutation during breeding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    pub rate: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self { rate: 0.001 }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, or use defaults if the file does not exist.
    ///
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!("Could not find {}. Using defaults.", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Agents bred back per group each round
    pub fn breed_count(&self) -> usize {
        self.population.cull_count
    }

    /// Reject parameter combinations the round cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.simulation.rounds == 0 {
            return invalid("simulation.rounds must be at least 1".into());
        }
        if self.simulation.runs == 0 {
            return invalid("simulation.runs must be at least 1".into());
        }

        let size = self.population.size;
        if size < 2 {
            return invalid(format!("population.size must be at least 2, got {}", size));
        }
        if self.population.cull_count >= size {
            return invalid(format!(
                "population.cull_count ({}) must be smaller than population.size ({})",
                self.population.cull_count, size
            ));
        }
        if self.interaction.sample_size > size - 1 {
            return invalid(format!(
                "interaction.sample_size ({}) cannot exceed population.size - 1 ({})",
                self.interaction.sample_size,
                size - 1
            ));
        }
        if self.interaction.locus_weights.iter().all(|&w| w == 0) {
            return invalid("interaction.locus_weights must not all be zero".into());
        }

        let rate = self.mutation.rate;
        if !(0.0..=1.0).contains(&rate) {
            return invalid(format!("mutation.rate must lie in [0, 1], got {}", rate));
        }

        let p = &self.payoff;
        if ![p.reward, p.temptation, p.sucker, p.punishment]
            .iter()
            .all(|v| v.is_finite())
        {
            return invalid("payoff values must be finite".into());
        }

        Ok(())
    }
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Cooperation Evolution Configuration

[simulation]
rounds = 1000
runs = 1
seed = 42
output_dir = "output"
write_summary = true

[population]
size = 50
cull_count = 20

[interaction]
sample_size = 20
locus_weights = [8, 4, 2, 1]

[payoff]
reward = 5.0
temptation = 0.0
sucker = -5.0
punishment = 0.0

[mutation]
rate = 0.001
"#
    .to_string()
}
