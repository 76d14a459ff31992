//! Monitor Configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then
//! `BEHAVIOR_MONITOR__SECTION__KEY` environment variables.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::Level;

use crate::predict::TendencyPriors;
use crate::types::Result;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "BEHAVIOR_MONITOR";

/// Complete monitor configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct MonitorConfig {
    #[serde(default)]
    pub detectors: DetectorToggles,
    #[serde(default)]
    pub prediction: PredictionConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MonitorConfig {
    /// Load configuration, optionally reading a TOML/JSON file
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let conservative = TendencyPriors::conservative();
        let mut builder = Config::builder()
            .set_default("detectors.revenge_trading", true)?
            .set_default("detectors.overtrading", true)?
            .set_default("detectors.emotional_patterns", true)?
            .set_default(
                "prediction.default_tendencies.revenge_trading_tendency",
                conservative.revenge_trading(),
            )?
            .set_default("prediction.default_tendencies.fomo_tendency", conservative.fomo())?
            .set_default(
                "prediction.default_tendencies.ego_trading_tendency",
                conservative.ego_trading(),
            )?
            .set_default(
                "prediction.default_tendencies.impulsive_tendency",
                conservative.impulsive(),
            )?
            .set_default("batch.max_concurrent_sessions", 0i64)?
            .set_default("logging.level", default_log_level())?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// The three independent detector switches
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct DetectorToggles {
    /// Revenge trading family
    #[serde(default = "enabled")]
    pub revenge_trading: bool,
    /// Session trade-count check
    #[serde(default = "enabled")]
    pub overtrading: bool,
    /// Remaining eight emotional-pattern detectors
    #[serde(default = "enabled")]
    pub emotional_patterns: bool,
}

impl Default for DetectorToggles {
    fn default() -> Self {
        Self {
            revenge_trading: true,
            overtrading: true,
            emotional_patterns: true,
        }
    }
}

/// Predictive module settings
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct PredictionConfig {
    /// Priors used when the caller has no trader history
    #[serde(default = "TendencyPriors::conservative")]
    pub default_tendencies: TendencyPriors,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            default_tendencies: TendencyPriors::conservative(),
        }
    }
}

/// Multi-session analysis settings
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct BatchConfig {
    /// Upper bound on sessions analyzed at once (0 = unbounded)
    #[serde(default)]
    pub max_concurrent_sessions: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct LoggingConfig {
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

impl LoggingConfig {
    /// Parsed tracing level; unknown names fall back to INFO
    pub fn max_level(&self) -> Level {
        self.level.parse().unwrap_or(Level::INFO)
    }
}

fn enabled() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
