//! Configuration management for the Weather Advisor
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. An explicit file passed with `--config`
//! 4. Environment variable overrides with WXA prefix

use std::path::Path;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::ThresholdConfig;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Forecast handling
    pub forecast: ForecastConfig,

    /// Output rendering
    pub output: OutputConfig,

    /// Rule thresholds for both personas
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    /// Days kept from the aggregated forecast
    pub max_days: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,

    /// Pretty-print JSON output
    pub pretty: bool,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Json,
    Csv,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let environment = std::env::var("WXA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let mut builder = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("forecast.max_days", 5)?
            .set_default("output.format", "json")?
            .set_default("output.pretty", true)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            // Override with environment variables (WXA_ prefix)
            .add_source(
                Environment::with_prefix("WXA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject inconsistent thresholds and an empty forecast window
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.forecast.max_days == 0 {
            return Err(ConfigError::Message("forecast.max_days must be at least 1".into()));
        }
        shared::validate_thresholds(&self.thresholds)
            .map_err(|msg| ConfigError::Message(format!("thresholds: {}", msg)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            forecast: ForecastConfig { max_days: 5 },
            output: OutputConfig {
                format: OutputFormat::Json,
                pretty: true,
            },
            thresholds: ThresholdConfig::default(),
        }
    }
}
