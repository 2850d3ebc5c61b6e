//! Chart rendering trait shared by the four pipelines

use crate::{ChartConfig, ColorScheme};
use crimeviz_common::Result;
use plotters::prelude::*;
use std::path::Path;

/// Trait for rendering a prepared chart to a single output file
#[async_trait::async_trait]
pub trait ChartRenderer {
    /// Render the chart to the given file path.
    ///
    /// Failure (unwritable path, drawing error) is fatal to the pipeline;
    /// either one complete file is written or none.
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()>;

    /// Short machine-readable chart name used in logs
    fn name(&self) -> &'static str;

    /// Get colors from a categorical color scheme
    fn get_colors(&self, scheme: &ColorScheme) -> Vec<RGBColor> {
        match scheme {
            ColorScheme::Default => vec![
                RGBColor(31, 119, 180),  // Blue
                RGBColor(255, 127, 14),  // Orange
                RGBColor(44, 160, 44),   // Green
                RGBColor(214, 39, 40),   // Red
                RGBColor(148, 103, 189), // Purple
                RGBColor(140, 86, 75),   // Brown
                RGBColor(227, 119, 194), // Pink
                RGBColor(127, 127, 127), // Gray
            ],
            ColorScheme::Custom(colors) => colors
                .iter()
                .map(|color_str| self.parse_color(color_str))
                .collect(),
        }
    }

    /// Parse a color string (hex format) to RGBColor
    fn parse_color(&self, color_str: &str) -> RGBColor {
        if let Some(hex) = color_str.strip_prefix('#') {
            if hex.len() == 6 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
        // Default to black if parsing fails
        RGBColor(0, 0, 0)
    }

    /// Get background color from style config
    fn get_background_color(&self, config: &ChartConfig) -> RGBColor {
        config
            .style
            .background_color
            .as_ref()
            .map(|color| self.parse_color(color))
            .unwrap_or(RGBColor(255, 255, 255))
    }
}
