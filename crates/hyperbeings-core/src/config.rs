//! Configuration loading and typed config structures for the HyperBeings
//! simulation.
//!
//! The canonical configuration lives in `hyperbeings-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads and validates the file.
//! Every field has a serde default, so an empty file (or no file at all)
//! yields the stock two-being demo society.

use std::path::Path;

use hyperbeings_agents::AgentConfig;
use hyperbeings_types::TraitOverrides;
use serde::Deserialize;

/// Environment variable overriding [`SocietyConfig::step_interval_ms`].
pub const STEP_INTERVAL_ENV: &str = "HYPERBEINGS_STEP_INTERVAL_MS";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `hyperbeings-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Step pacing and social dynamics.
    #[serde(default)]
    pub society: SocietyConfig,

    /// Starting values for new beings.
    #[serde(default)]
    pub economy: EconomyConfig,

    /// Simulation boundary parameters.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Random source selection.
    #[serde(default)]
    pub random: RandomConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Beings created when the engine starts.
    #[serde(default = "default_seed_agents")]
    pub seed_agents: Vec<SeedAgentConfig>,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `HYPERBEINGS_STEP_INTERVAL_MS` overrides `society.step_interval_ms`
    /// when set to a valid integer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // Treat an empty document as all defaults.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.society.apply_env_overrides();
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Step pacing and social dynamics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SocietyConfig {
    /// Real-time milliseconds between simulation steps.
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,

    /// Delay between consecutive economic activities within a step
    /// (0 disables the delay).
    #[serde(default = "default_activity_pacing_ms")]
    pub activity_pacing_ms: u64,

    /// Maximum random interactions attempted per step.
    #[serde(default = "default_interactions_per_step")]
    pub interactions_per_step: usize,

    /// Maximum existing beings a newcomer is introduced to.
    #[serde(default = "default_introductions_per_agent")]
    pub introductions_per_agent: usize,

    /// Probability that a being works during a step.
    #[serde(default = "default_activity_probability")]
    pub activity_probability: f64,

    /// Probability that a successful social interaction leads to a
    /// collaboration proposal.
    #[serde(default = "default_collaboration_probability")]
    pub collaboration_probability: f64,

    /// Compatibility a pair must exceed to start a project.
    #[serde(default = "default_collaboration_threshold")]
    pub collaboration_threshold: f64,
}

impl SocietyConfig {
    /// Override the step interval from the environment when set.
    pub fn apply_env_overrides(&mut self) {
        if let Some(ms) = std::env::var(STEP_INTERVAL_ENV)
            .ok()
            .and_then(|val| val.trim().parse::<u64>().ok())
        {
            self.step_interval_ms = ms;
        }
    }
}

impl Default for SocietyConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: default_step_interval_ms(),
            activity_pacing_ms: default_activity_pacing_ms(),
            interactions_per_step: default_interactions_per_step(),
            introductions_per_agent: default_introductions_per_agent(),
            activity_probability: default_activity_probability(),
            collaboration_probability: default_collaboration_probability(),
            collaboration_threshold: default_collaboration_threshold(),
        }
    }
}

/// Starting values for new beings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EconomyConfig {
    /// Tokens each being starts with.
    #[serde(default = "default_starting_wallet")]
    pub starting_wallet: u64,

    /// Reputation each being starts with.
    #[serde(default = "default_starting_reputation")]
    pub starting_reputation: u8,

    /// Maximum noise applied to initial skills.
    #[serde(default = "default_skill_noise")]
    pub skill_noise: f64,
}

impl EconomyConfig {
    /// Convert into the per-being creation config.
    pub const fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            starting_wallet: self.starting_wallet,
            starting_reputation: self.starting_reputation,
            skill_noise: self.skill_noise,
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_wallet: default_starting_wallet(),
            starting_reputation: default_starting_reputation(),
            skill_noise: default_skill_noise(),
        }
    }
}

/// Simulation boundary configuration.
///
/// A value of 0 for either `max_steps` or `max_real_time_seconds` means
/// unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of steps before the simulation ends (0 = unlimited).
    #[serde(default)]
    pub max_steps: u64,

    /// Maximum wall-clock seconds before the simulation ends (0 = unlimited).
    #[serde(default)]
    pub max_real_time_seconds: u64,
}

/// Random source selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RandomConfig {
    /// Seed for a reproducible run. Unseeded runs use the thread RNG.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter (trace, debug, info, warn, error). `RUST_LOG`
    /// takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// A being created at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedAgentConfig {
    /// Display name.
    pub name: String,

    /// Trait overrides; omitted traits are randomized.
    #[serde(default)]
    pub traits: TraitOverrides,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_step_interval_ms() -> u64 {
    5000
}

const fn default_activity_pacing_ms() -> u64 {
    500
}

const fn default_interactions_per_step() -> usize {
    3
}

const fn default_introductions_per_agent() -> usize {
    3
}

const fn default_activity_probability() -> f64 {
    0.7
}

const fn default_collaboration_probability() -> f64 {
    0.3
}

const fn default_collaboration_threshold() -> f64 {
    60.0
}

const fn default_starting_wallet() -> u64 {
    100
}

const fn default_starting_reputation() -> u8 {
    50
}

const fn default_skill_noise() -> f64 {
    10.0
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_seed_agents() -> Vec<SeedAgentConfig> {
    vec![
        SeedAgentConfig {
            name: "Alice".to_owned(),
            traits: TraitOverrides {
                creativity: Some(85),
                socialness: Some(90),
                risk_taking: Some(45),
                ambition: Some(80),
                empathy: Some(75),
            },
        },
        SeedAgentConfig {
            name: "Bob".to_owned(),
            traits: TraitOverrides {
                creativity: Some(70),
                socialness: Some(65),
                risk_taking: Some(90),
                ambition: Some(85),
                empathy: Some(60),
            },
        },
    ]
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            society: SocietyConfig::default(),
            economy: EconomyConfig::default(),
            simulation: SimulationBoundsConfig::default(),
            random: RandomConfig::default(),
            logging: LoggingConfig::default(),
            seed_agents: default_seed_agents(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.society.activity_pacing_ms, 500);
        assert_eq!(config.society.interactions_per_step, 3);
        assert_eq!(config.economy.starting_wallet, 100);
        assert_eq!(config.simulation.max_steps, 0);
        assert_eq!(config.random.seed, None);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.seed_agents.len(), 2);
        assert_eq!(config.seed_agents.first().map(|a| a.name.as_str()), Some("Alice"));
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
society:
  activity_pacing_ms: 0
  interactions_per_step: 5
  introductions_per_agent: 2
  activity_probability: 1.0
  collaboration_probability: 0.5
  collaboration_threshold: 70.0

economy:
  starting_wallet: 250
  starting_reputation: 40
  skill_noise: 0.0

simulation:
  max_steps: 12
  max_real_time_seconds: 60

random:
  seed: 99

logging:
  level: "debug"

seed_agents:
  - name: "Zed"
    traits:
      creativity: 0
      ambition: 95
"#;

        let config = SimulationConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.society.activity_pacing_ms, 0);
        assert_eq!(config.society.interactions_per_step, 5);
        assert_eq!(config.economy.starting_wallet, 250);
        assert_eq!(config.economy.agent_config().starting_reputation, 40);
        assert_eq!(config.simulation.max_steps, 12);
        assert_eq!(config.random.seed, Some(99));
        assert_eq!(config.logging.level, "debug");

        let zed = config.seed_agents.first();
        assert_eq!(zed.map(|a| a.name.as_str()), Some("Zed"));
        assert_eq!(zed.and_then(|a| a.traits.creativity), Some(0));
        assert_eq!(zed.and_then(|a| a.traits.socialness), None);
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "random:\n  seed: 7\n";
        let config = SimulationConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        // Seed is overridden
        assert_eq!(config.random.seed, Some(7));
        // Everything else uses defaults
        assert_eq!(config.economy.starting_reputation, 50);
        assert_eq!(config.seed_agents.len(), 2);
    }

    #[test]
    fn parse_empty_yaml() {
        let config = SimulationConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let config = SimulationConfig::parse("economy: [not, a, mapping]");
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("hyperbeings-config.yaml");
        if path.exists() {
            let config = SimulationConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
