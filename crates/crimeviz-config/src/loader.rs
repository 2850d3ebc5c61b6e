//! Configuration loading utilities

use crate::Config;
use crimeviz_common::Result as VizResult;
use std::env;
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for crimeviz_common::CrimeVizError {
    fn from(err: ConfigError) -> Self {
        crimeviz_common::CrimeVizError::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;

        config.validate_all().map_err(ConfigError::ValidationError)?;

        Ok(config)
    }

    /// Load configuration from environment variables and well-known files
    pub fn load() -> VizResult<Config> {
        let config = if let Ok(config_path) = env::var("CRIMEVIZ_CONFIG_PATH") {
            Self::load_config(&config_path)?
        } else if Path::new("crimeviz.yaml").exists() {
            Self::load_config("crimeviz.yaml")?
        } else if Path::new("crimeviz.yml").exists() {
            Self::load_config("crimeviz.yml")?
        } else {
            // No config file found, use defaults with env overrides
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            config.validate_all().map_err(ConfigError::ValidationError)?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> VizResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        if let Ok(csv_path) = env::var("CRIMEVIZ_CSV_PATH") {
            config.data.csv_path = csv_path;
        }

        if let Ok(dir) = env::var("CRIMEVIZ_OUTPUT_DIR") {
            config.output.dir = dir;
        }

        if let Ok(level) = env::var("CRIMEVIZ_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(top_n) = env::var("CRIMEVIZ_TRENDS_TOP_N") {
            config.trends.top_n = top_n.parse().map_err(|e| ConfigError::EnvParseError {
                var: "CRIMEVIZ_TRENDS_TOP_N".to_string(),
                source: Box::new(e),
            })?;
        }

        Ok(())
    }
}
