use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{MatchingEngine, MatchingError, PoolStrategy, ValidationBaseline, DEFAULT_NUM_MATCHES, MIN_MATCH_SCORE};
use crate::models::CategoryWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
    pub max_payload_bytes: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            max_payload_bytes: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub num_matches: Option<usize>,
    pub min_score: Option<f64>,
    #[serde(default)]
    pub pool_strategy: PoolStrategy,
    #[serde(default)]
    pub validation_baseline: ValidationBaseline,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_demographics_weight")]
    pub demographics: f64,
    #[serde(default = "default_personality_weight")]
    pub personality: f64,
    #[serde(default = "default_values_weight")]
    pub values: f64,
    #[serde(default = "default_lifestyle_weight")]
    pub lifestyle: f64,
    #[serde(default = "default_interests_weight")]
    pub interests: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            demographics: default_demographics_weight(),
            personality: default_personality_weight(),
            values: default_values_weight(),
            lifestyle: default_lifestyle_weight(),
            interests: default_interests_weight(),
        }
    }
}

impl From<&WeightsConfig> for CategoryWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            demographics: config.demographics,
            personality: config.personality,
            values: config.values,
            lifestyle: config.lifestyle,
            interests: config.interests,
        }
    }
}

fn default_demographics_weight() -> f64 { 0.10 }
fn default_personality_weight() -> f64 { 0.30 }
fn default_values_weight() -> f64 { 0.25 }
fn default_lifestyle_weight() -> f64 { 0.20 }
fn default_interests_weight() -> f64 { 0.15 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with COHORT)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., COHORT__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("COHORT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("COHORT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Matching engine configured from these settings
    pub fn build_engine(&self) -> Result<MatchingEngine, MatchingError> {
        let weights = CategoryWeights::from(&self.scoring.weights);
        let num_matches = self.matching.num_matches.unwrap_or(DEFAULT_NUM_MATCHES);

        Ok(MatchingEngine::new(weights, num_matches)?
            .with_min_score(self.matching.min_score.unwrap_or(MIN_MATCH_SCORE))
            .with_pool_strategy(self.matching.pool_strategy)
            .with_validation_baseline(self.matching.validation_baseline))
    }
}
