//! Chart configuration and color types

use serde::{Deserialize, Serialize};

/// Chart configuration shared by all renderers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub style: StyleConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Chart".to_string(),
            width: 800,
            height: 600,
            x_label: None,
            y_label: None,
            style: StyleConfig::default(),
        }
    }
}

/// Categorical color scheme for multi-series charts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ColorScheme {
    Default,
    Custom(Vec<String>),
}

/// Font configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    pub family: String,
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 12,
        }
    }
}

/// Margin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginConfig {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            right: 20,
            bottom: 40,
            left: 60,
        }
    }
}

/// Styling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    pub color_scheme: ColorScheme,
    pub background_color: Option<String>,
    pub title_font: FontConfig,
    pub axis_font: FontConfig,
    pub margins: MarginConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Default,
            background_color: Some("#FFFFFF".to_string()),
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 16,
            },
            axis_font: FontConfig::default(),
            margins: MarginConfig::default(),
        }
    }
}

/// Continuous gradient palette for heatmap and polar value encoding.
///
/// Sampling interpolates linearly between adjacent stops over [0, 1].
#[derive(Debug, Clone)]
pub struct GradientPalette {
    stops: Vec<(u8, u8, u8)>,
}

impl GradientPalette {
    /// Build a palette from ordered RGB stops; at least two are required
    pub fn new(stops: Vec<(u8, u8, u8)>) -> Self {
        assert!(stops.len() >= 2, "gradient needs at least two stops");
        Self { stops }
    }

    /// Light-to-dark iridescent palette used by the month heatmap
    pub fn iridescent() -> Self {
        Self::new(vec![
            (254, 251, 230),
            (235, 240, 185),
            (202, 228, 156),
            (156, 209, 143),
            (104, 184, 141),
            (59, 153, 146),
            (36, 115, 143),
            (34, 74, 121),
            (31, 36, 84),
        ])
    }

    /// Dark-to-bright magma-style palette used by the polar chart,
    /// truncated to avoid washed-out light tones
    pub fn magma() -> Self {
        Self::new(vec![
            (252, 253, 191),
            (254, 176, 120),
            (241, 96, 93),
            (183, 55, 121),
            (114, 31, 129),
            (44, 17, 95),
            (3, 5, 26),
        ])
    }

    /// Sample the palette at `t` in [0, 1]; out-of-range values clamp
    pub fn sample(&self, t: f64) -> (u8, u8, u8) {
        let t = t.clamp(0.0, 1.0);
        let segments = (self.stops.len() - 1) as f64;
        let position = t * segments;
        let index = (position.floor() as usize).min(self.stops.len() - 2);
        let fraction = position - index as f64;

        let (r0, g0, b0) = self.stops[index];
        let (r1, g1, b1) = self.stops[index + 1];
        (
            lerp_channel(r0, r1, fraction),
            lerp_channel(g0, g1, fraction),
            lerp_channel(b0, b1, fraction),
        )
    }

    /// Sample and format as a CSS hex color
    pub fn sample_hex(&self, t: f64) -> String {
        let (r, g, b) = self.sample(t);
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_config_default() {
        let config = ChartConfig::default();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert!(matches!(config.style.color_scheme, ColorScheme::Default));
    }

    #[test]
    fn test_gradient_endpoints() {
        let palette = GradientPalette::new(vec![(0, 0, 0), (255, 255, 255)]);
        assert_eq!(palette.sample(0.0), (0, 0, 0));
        assert_eq!(palette.sample(1.0), (255, 255, 255));
        assert_eq!(palette.sample(0.5), (128, 128, 128));
    }

    #[test]
    fn test_gradient_clamps() {
        let palette = GradientPalette::new(vec![(0, 0, 0), (255, 255, 255)]);
        assert_eq!(palette.sample(-1.0), (0, 0, 0));
        assert_eq!(palette.sample(2.0), (255, 255, 255));
    }

    #[test]
    fn test_gradient_hex_format() {
        let palette = GradientPalette::new(vec![(0, 0, 0), (255, 255, 255)]);
        assert_eq!(palette.sample_hex(0.0), "#000000");
        assert_eq!(palette.sample_hex(1.0), "#ffffff");
    }

    #[test]
    fn test_builtin_palettes() {
        // Both built-ins sample without panicking across the domain
        for palette in [GradientPalette::iridescent(), GradientPalette::magma()] {
            for i in 0..=10 {
                let _ = palette.sample(i as f64 / 10.0);
            }
        }
    }
}
