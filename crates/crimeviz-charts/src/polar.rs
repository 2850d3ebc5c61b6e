//! Hourly polar bar chart with a per-year visibility toggle

use crate::html::{escape_text, html_document, write_html};
use crate::{ChartConfig, ChartRenderer, GradientPalette};
use async_trait::async_trait;
use crimeviz_common::{format_hour_24, Result};
use crimeviz_data::YearHourCounts;
use std::f64::consts::TAU;
use std::fmt::Write as _;
use std::path::Path;

/// One angular/radial bar segment representing an hour-of-day bucket
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    /// Hour of day, 0-23
    pub hour: u32,
    /// Incident count in this hour bucket
    pub count: u32,
    /// Start angle in radians
    pub start_angle: f64,
    /// End angle in radians
    pub end_angle: f64,
    /// Inner radius; kept slightly above zero so the path stays annular
    pub inner_radius: f64,
    /// Outer radius, linear in count normalized to the global maximum
    pub outer_radius: f64,
}

/// Build the 24 wedges for one year of hour counts.
///
/// Each wedge spans `2π/24` radians centered on `hour/24 · 2π`; its radial
/// extent is `count / max_count · max_radius`, where `max_count` is the
/// global maximum across all years in view so radii stay comparable
/// between years.
pub fn wedges_for_year(counts: &[u32; 24], max_count: u32, max_radius: f64) -> Vec<Wedge> {
    let bar_width = TAU / 24.0;
    (0..24u32)
        .map(|hour| {
            let angle = hour as f64 / 24.0 * TAU;
            let count = counts[hour as usize];
            let outer_radius = if max_count == 0 {
                0.0
            } else {
                count as f64 / max_count as f64 * max_radius
            };
            Wedge {
                hour,
                count,
                start_angle: angle - bar_width / 2.0,
                end_angle: angle + bar_width / 2.0,
                inner_radius: 0.1,
                outer_radius,
            }
        })
        .collect()
}

/// Polar bar chart of incident counts by hour of day.
///
/// One wedge set is computed per year; the rendered page shows exactly one
/// year at a time, switched by a year selector.
#[derive(Debug)]
pub struct HourlyPolarChart {
    /// Dense per-year hour counts, ordered by year
    pub years: Vec<YearHourCounts>,
    /// Radius given to the globally largest hour count
    pub max_radius: f64,
    /// Continuous fill palette keyed on wedge count
    pub palette: GradientPalette,
}

impl HourlyPolarChart {
    /// Create an empty chart with the given maximum radius
    pub fn new(max_radius: f64) -> Self {
        Self {
            years: Vec::new(),
            max_radius,
            palette: GradientPalette::magma(),
        }
    }

    /// Create a chart with custom title sized for a square canvas
    pub fn with_config(title: &str, max_radius: f64) -> (Self, ChartConfig) {
        let chart = Self::new(max_radius);
        let mut config = ChartConfig {
            title: title.to_string(),
            ..Default::default()
        };
        config.width = 500;
        config.height = 500;
        (chart, config)
    }

    /// Set the prepared per-year counts
    pub fn set_years(&mut self, years: Vec<YearHourCounts>) {
        self.years = years;
    }

    /// Largest hour count across all years in view
    pub fn global_max_count(&self) -> u32 {
        self.years.iter().map(|y| y.max_count()).max().unwrap_or(0)
    }

    fn point(radius: f64, angle: f64) -> (f64, f64) {
        // SVG y grows downward; negate to keep the mathematical orientation
        (radius * angle.cos(), -radius * angle.sin())
    }

    fn wedge_path(wedge: &Wedge) -> String {
        let (x1, y1) = Self::point(wedge.outer_radius, wedge.start_angle);
        let (x2, y2) = Self::point(wedge.outer_radius, wedge.end_angle);
        let (x3, y3) = Self::point(wedge.inner_radius, wedge.end_angle);
        let (x4, y4) = Self::point(wedge.inner_radius, wedge.start_angle);
        format!(
            "M {:.2} {:.2} A {:.2} {:.2} 0 0 0 {:.2} {:.2} L {:.2} {:.2} A {:.2} {:.2} 0 0 1 {:.2} {:.2} Z",
            x1, y1, wedge.outer_radius, wedge.outer_radius, x2, y2, x3, y3,
            wedge.inner_radius, wedge.inner_radius, x4, y4,
        )
    }

    fn year_group_svg(&self, year: i32, counts: &[u32; 24], max_count: u32, visible: bool) -> String {
        let display = if visible { "inline" } else { "none" };
        let mut group = format!(
            "<g id=\"year-{}\" class=\"year-group\" style=\"display:{}\">\n",
            year, display
        );
        for wedge in wedges_for_year(counts, max_count, self.max_radius) {
            let t = if max_count == 0 {
                0.0
            } else {
                wedge.count as f64 / max_count as f64
            };
            let _ = writeln!(
                group,
                "<path d=\"{}\" fill=\"{}\" stroke=\"#444444\" stroke-width=\"0.5\">\
                 <title>{}: {} incidents</title></path>",
                Self::wedge_path(&wedge),
                self.palette.sample_hex(t),
                escape_text(&format_hour_24(wedge.hour)),
                wedge.count,
            );
        }
        group.push_str("</g>\n");
        group
    }

    fn chart_furniture_svg(&self) -> String {
        let mut svg = String::new();
        // Dashed reference circles at one third, two thirds and full radius
        for fraction in [1.0 / 3.0, 2.0 / 3.0, 1.0] {
            let _ = writeln!(
                svg,
                "<circle cx=\"0\" cy=\"0\" r=\"{:.2}\" fill=\"none\" stroke=\"#888888\" \
                 stroke-width=\"1\" stroke-dasharray=\"4 4\" opacity=\"0.7\"/>",
                self.max_radius * fraction
            );
        }
        // Hour spokes and labels
        for hour in 0..24u32 {
            let angle = hour as f64 / 24.0 * TAU;
            let (x, y) = Self::point(self.max_radius, angle);
            let _ = writeln!(
                svg,
                "<line x1=\"0\" y1=\"0\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"#666666\" \
                 stroke-width=\"1\" opacity=\"0.6\"/>",
                x, y
            );
            let (label_x, label_y) = Self::point(self.max_radius + 20.0, angle);
            let _ = writeln!(
                svg,
                "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" \
                 dominant-baseline=\"middle\" font-size=\"9\" font-weight=\"bold\" \
                 fill=\"#333333\">{}</text>",
                label_x, label_y, hour
            );
        }
        svg
    }

    fn selector_html(&self) -> String {
        let mut options = String::new();
        for (i, year) in self.years.iter().enumerate() {
            let selected = if i == 0 { " selected" } else { "" };
            let _ = writeln!(
                options,
                "<option value=\"{year}\"{selected}>{year}</option>",
                year = year.year,
                selected = selected
            );
        }
        format!(
            "<label for=\"year-select\">Choose Year</label>\n\
             <select id=\"year-select\">\n{}</select>\n",
            options
        )
    }

    // Exactly one year group is visible at any time; the selector maps each
    // year label to its wedge group.
    const TOGGLE_SCRIPT: &'static str = "<script>\n\
        const select = document.getElementById('year-select');\n\
        select.addEventListener('change', function () {\n\
          document.querySelectorAll('.year-group').forEach(function (group) {\n\
            group.style.display = 'none';\n\
          });\n\
          const active = document.getElementById('year-' + this.value);\n\
          if (active) { active.style.display = 'inline'; }\n\
        });\n\
        </script>";
}

#[async_trait]
impl ChartRenderer for HourlyPolarChart {
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        let max_count = self.global_max_count();
        let extent = self.max_radius + 70.0;

        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" \
             viewBox=\"{:.0} {:.0} {:.0} {:.0}\">\n",
            config.width,
            config.height,
            -extent,
            -extent,
            extent * 2.0,
            extent * 2.0,
        );
        svg.push_str(&self.chart_furniture_svg());
        for (i, year) in self.years.iter().enumerate() {
            svg.push_str(&self.year_group_svg(year.year, &year.counts, max_count, i == 0));
        }
        svg.push_str("</svg>\n");

        let body = format!(
            "<h2>{}</h2>\n{}\n{}\n{}",
            escape_text(&config.title),
            svg,
            self.selector_html(),
            Self::TOGGLE_SCRIPT,
        );
        let html = html_document(&config.title, "", &body);
        write_html(path, &html)?;
        tracing::info!("Successfully rendered hourly polar chart to {}", path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "hourly_polar"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_years() -> Vec<YearHourCounts> {
        let mut counts_2003 = [0u32; 24];
        counts_2003[14] = 200;
        counts_2003[3] = 100;
        let mut counts_2004 = [0u32; 24];
        counts_2004[22] = 50;
        vec![
            YearHourCounts {
                year: 2003,
                counts: counts_2003,
            },
            YearHourCounts {
                year: 2004,
                counts: counts_2004,
            },
        ]
    }

    #[test]
    fn test_wedge_geometry() {
        let mut counts = [0u32; 24];
        counts[3] = 100;
        let wedges = wedges_for_year(&counts, 200, 180.0);
        assert_eq!(wedges.len(), 24);

        let bar_width = TAU / 24.0;
        let wedge = &wedges[3];
        assert_eq!(wedge.hour, 3);
        assert_eq!(wedge.count, 100);
        // Half the global max reaches half the configured radius
        assert!((wedge.outer_radius - 90.0).abs() < 1e-9);
        let center = 3.0 / 24.0 * TAU;
        assert!((wedge.start_angle - (center - bar_width / 2.0)).abs() < 1e-9);
        assert!((wedge.end_angle - (center + bar_width / 2.0)).abs() < 1e-9);
        assert_eq!(wedge.inner_radius, 0.1);
    }

    #[test]
    fn test_wedges_with_zero_max() {
        let counts = [0u32; 24];
        let wedges = wedges_for_year(&counts, 0, 180.0);
        assert!(wedges.iter().all(|w| w.outer_radius == 0.0));
    }

    #[test]
    fn test_global_max_count() {
        let mut chart = HourlyPolarChart::new(180.0);
        assert_eq!(chart.global_max_count(), 0);

        chart.set_years(sample_years());
        assert_eq!(chart.global_max_count(), 200);
    }

    #[test]
    fn test_wedge_path_is_closed() {
        let wedge = Wedge {
            hour: 0,
            count: 10,
            start_angle: -0.1,
            end_angle: 0.1,
            inner_radius: 0.1,
            outer_radius: 90.0,
        };
        let path = HourlyPolarChart::wedge_path(&wedge);
        assert!(path.starts_with("M "));
        assert!(path.ends_with('Z'));
        assert_eq!(path.matches('A').count(), 2);
    }

    #[tokio::test]
    async fn test_render_exactly_one_year_visible() {
        let mut chart = HourlyPolarChart::new(180.0);
        chart.set_years(sample_years());

        let (_, config) = HourlyPolarChart::with_config("Crime Time Distribution", 180.0);

        let dir = tempdir().unwrap();
        let path = dir.path().join("polar.html");
        chart.render_to_file(&config, &path).await.unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert_eq!(html.matches("class=\"year-group\"").count(), 2);
        assert_eq!(html.matches("style=\"display:inline\"").count(), 1);
        assert_eq!(html.matches("style=\"display:none\"").count(), 1);
        assert!(html.contains("id=\"year-select\""));
        assert!(html.contains("<title>14:00: 200 incidents</title>"));
        // 24 wedges per year
        assert_eq!(html.matches("<path ").count(), 48);
    }
}
