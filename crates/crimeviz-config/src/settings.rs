//! Application configuration structures

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Config {
    /// Input dataset configuration
    #[validate]
    pub data: DataConfig,

    /// Output location configuration
    #[validate]
    pub output: OutputConfig,

    /// Category trends line chart settings
    #[validate]
    pub trends: TrendsConfig,

    /// Yearly heat map settings
    #[validate]
    pub heat_map: HeatMapConfig,

    /// Year-by-month heatmap settings
    #[validate]
    pub month_heatmap: MonthHeatmapConfig,

    /// Hourly polar chart settings
    #[validate]
    pub polar: PolarConfig,

    /// Logging configuration
    #[validate]
    pub logging: LoggingConfig,
}

/// Input dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DataConfig {
    /// Path to the incident CSV file
    #[validate(length(min = 1, message = "CSV path cannot be empty"))]
    pub csv_path: String,
}

/// Output location configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OutputConfig {
    /// Directory that receives the generated chart files
    #[validate(length(min = 1, message = "Output directory cannot be empty"))]
    pub dir: String,
}

/// Category trends line chart settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TrendsConfig {
    /// Number of most frequent categories to plot
    #[validate(range(min = 1, max = 10, message = "Top-N must be between 1 and 10"))]
    pub top_n: usize,

    /// Category rendered at full opacity; all others are muted
    #[validate(length(min = 1, message = "Highlight category cannot be empty"))]
    pub highlight_category: String,

    /// Chart title
    pub title: String,

    /// Output file name
    #[validate(length(min = 1, message = "File name cannot be empty"))]
    pub file_name: String,

    /// Chart width in pixels
    #[validate(range(min = 100, max = 4000, message = "Width must be between 100 and 4000 pixels"))]
    pub width: u32,

    /// Chart height in pixels
    #[validate(range(min = 100, max = 4000, message = "Height must be between 100 and 4000 pixels"))]
    pub height: u32,
}

/// Yearly heat map settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HeatMapConfig {
    /// Optional incident category filter (case-insensitive exact match);
    /// `None` maps all incidents
    pub category: Option<String>,

    /// First year of the animated range (inclusive)
    #[validate(range(min = 1900, max = 2100, message = "Year must be between 1900 and 2100"))]
    pub start_year: i32,

    /// Last year of the animated range (inclusive)
    #[validate(range(min = 1900, max = 2100, message = "Year must be between 1900 and 2100"))]
    pub end_year: i32,

    /// Map center latitude
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be within [-90, 90]"))]
    pub center_latitude: f64,

    /// Map center longitude
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be within [-180, 180]"))]
    pub center_longitude: f64,

    /// Initial map zoom level
    #[validate(range(min = 1, max = 20, message = "Zoom must be between 1 and 20"))]
    pub zoom: u8,

    /// Heat point radius in pixels
    #[validate(range(min = 1, max = 100, message = "Radius must be between 1 and 100 pixels"))]
    pub radius: u32,

    /// Maximum heat layer opacity
    #[validate(range(min = 0.0, max = 1.0, message = "Opacity must be within [0, 1]"))]
    pub max_opacity: f64,

    /// Whether the year animation starts automatically
    pub auto_play: bool,

    /// Output file name
    #[validate(length(min = 1, message = "File name cannot be empty"))]
    pub file_name: String,
}

/// Year-by-month heatmap settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MonthHeatmapConfig {
    /// Incident category to aggregate (case-insensitive exact match)
    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: String,

    /// First year of the grid (inclusive)
    #[validate(range(min = 1900, max = 2100, message = "Year must be between 1900 and 2100"))]
    pub start_year: i32,

    /// Last year of the grid (inclusive)
    #[validate(range(min = 1900, max = 2100, message = "Year must be between 1900 and 2100"))]
    pub end_year: i32,

    /// Output file name
    #[validate(length(min = 1, message = "File name cannot be empty"))]
    pub file_name: String,

    /// Chart width in pixels
    #[validate(range(min = 100, max = 4000, message = "Width must be between 100 and 4000 pixels"))]
    pub width: u32,

    /// Chart height in pixels
    #[validate(range(min = 100, max = 4000, message = "Height must be between 100 and 4000 pixels"))]
    pub height: u32,
}

/// Hourly polar chart settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PolarConfig {
    /// Incident category to aggregate (case-insensitive exact match)
    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: String,

    /// First year offered by the year selector (inclusive)
    #[validate(range(min = 1900, max = 2100, message = "Year must be between 1900 and 2100"))]
    pub start_year: i32,

    /// Last year offered by the year selector (inclusive)
    #[validate(range(min = 1900, max = 2100, message = "Year must be between 1900 and 2100"))]
    pub end_year: i32,

    /// Maximum wedge radius in SVG units; counts scale linearly up to this
    #[validate(range(min = 10.0, max = 1000.0, message = "Max radius must be between 10 and 1000"))]
    pub max_radius: f64,

    /// Output file name
    #[validate(length(min = 1, message = "File name cannot be empty"))]
    pub file_name: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(function = "crate::validation::validate_log_level"))]
    pub level: String,

    /// Optional log file path
    pub file: Option<String>,

    /// Whether to use colored console output
    pub colored: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            output: OutputConfig::default(),
            trends: TrendsConfig::default(),
            heat_map: HeatMapConfig::default(),
            month_heatmap: MonthHeatmapConfig::default(),
            polar: PolarConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: "data/combined_crime_data.csv".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "out".to_string(),
        }
    }
}

impl Default for TrendsConfig {
    fn default() -> Self {
        Self {
            top_n: 6,
            highlight_category: "motor vehicle theft".to_string(),
            title: "Monthly Crime Trends (Top 6 Categories, 2003-2025)".to_string(),
            file_name: "crime_trends.html".to_string(),
            width: 1200,
            height: 600,
        }
    }
}

impl Default for HeatMapConfig {
    fn default() -> Self {
        Self {
            category: Some("motor vehicle theft".to_string()),
            start_year: 2003,
            end_year: 2024,
            center_latitude: 37.7749,
            center_longitude: -122.4194,
            zoom: 12,
            radius: 15,
            max_opacity: 0.8,
            auto_play: true,
            file_name: "crime_heat_map.html".to_string(),
        }
    }
}

impl Default for MonthHeatmapConfig {
    fn default() -> Self {
        Self {
            category: "motor vehicle theft".to_string(),
            start_year: 2003,
            end_year: 2025,
            file_name: "motor_vehicle_theft_heatmap.html".to_string(),
            width: 600,
            height: 600,
        }
    }
}

impl Default for PolarConfig {
    fn default() -> Self {
        Self {
            category: "motor vehicle theft".to_string(),
            start_year: 2003,
            end_year: 2024,
            max_radius: 180.0,
            file_name: "crime_time_distribution.html".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            colored: true,
        }
    }
}

impl Config {
    /// Comprehensive validation of the entire configuration
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()?;

        let mut errors = validator::ValidationErrors::new();
        if self.heat_map.start_year > self.heat_map.end_year {
            errors.add("heat_map", crate::validation::year_order_error());
        }
        if self.month_heatmap.start_year > self.month_heatmap.end_year {
            errors.add("month_heatmap", crate::validation::year_order_error());
        }
        if self.polar.start_year > self.polar.end_year {
            errors.add("polar", crate::validation::year_order_error());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
