//! Configuration management for the crimeviz chart pipelines

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{
    Config, DataConfig, HeatMapConfig, LoggingConfig, MonthHeatmapConfig, OutputConfig,
    PolarConfig, TrendsConfig,
};
