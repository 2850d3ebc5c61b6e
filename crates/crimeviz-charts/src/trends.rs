//! Monthly category trends line chart

use crate::html::{html_document, write_html};
use crate::{ChartConfig, ChartRenderer};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use crimeviz_common::Result;
use crimeviz_data::CategorySeries;
use plotters::prelude::*;
use std::path::Path;

/// Line chart of monthly incident counts, one series per category.
///
/// All series are drawn; every series except the highlighted category is
/// muted (reduced alpha), reproducing the source chart's default view.
#[derive(Debug)]
pub struct CategoryTrendsChart {
    /// One ordered series per category
    pub series: Vec<CategorySeries>,
    /// Category drawn at full opacity (case-insensitive match)
    pub highlight: Option<String>,
    /// Alpha applied to non-highlighted series
    pub muted_alpha: f64,
}

impl CategoryTrendsChart {
    /// Create an empty chart
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            highlight: None,
            muted_alpha: 0.25,
        }
    }

    /// Create a chart with custom title and labels
    pub fn with_config(
        title: &str,
        x_label: Option<&str>,
        y_label: Option<&str>,
    ) -> (Self, ChartConfig) {
        let chart = Self::new();
        let mut config = ChartConfig {
            title: title.to_string(),
            x_label: x_label.map(|s| s.to_string()),
            y_label: y_label.map(|s| s.to_string()),
            ..Default::default()
        };

        // Wide canvas so two decades of monthly points stay readable
        config.width = 1200;
        config.height = 600;
        config.style.margins.bottom = 60;
        config.style.margins.left = 80;

        (chart, config)
    }

    /// Set the prepared series
    pub fn set_series(&mut self, series: Vec<CategorySeries>) {
        self.series = series;
    }

    /// Set the category drawn at full opacity
    pub fn set_highlight(&mut self, category: impl Into<String>) {
        self.highlight = Some(category.into());
    }

    fn is_highlighted(&self, name: &str) -> bool {
        match &self.highlight {
            Some(highlight) => name.eq_ignore_ascii_case(highlight),
            None => true,
        }
    }

    /// Convert a month date to a continuous x-axis value
    fn date_to_x_value(date: &NaiveDate) -> f64 {
        date.year() as f64 + (date.month() as f64 - 1.0) / 12.0
    }

    /// Format an x-axis value back into "YYYY-MM"
    fn format_x_label(x: f64) -> String {
        let year = x.floor() as i32;
        let month = (((x - year as f64) * 12.0).round() as u32 + 1).min(12);
        format!("{}-{:02}", year, month)
    }

    /// Get data ranges for axis scaling
    fn get_data_ranges(&self) -> (f64, f64, f64, f64) {
        let x_values: Vec<f64> = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|(date, _)| Self::date_to_x_value(date)))
            .collect();
        if x_values.is_empty() {
            return (0.0, 1.0, 0.0, 10.0);
        }

        let x_min = x_values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let x_max = x_values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        let y_max = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|(_, count)| *count as f64))
            .fold(0.0f64, f64::max)
            * 1.1; // 10% headroom

        (x_min - 0.1, x_max + 0.1, 0.0, y_max.max(10.0))
    }
}

impl Default for CategoryTrendsChart {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChartRenderer for CategoryTrendsChart {
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
                .into_drawing_area();
            let bg_color = self.get_background_color(config);
            root.fill(&bg_color)?;

            let (x_min, x_max, y_min, y_max) = self.get_data_ranges();
            let title_font = (
                config.style.title_font.family.as_str(),
                config.style.title_font.size,
            );
            let mut chart = ChartBuilder::on(&root)
                .caption(&config.title, title_font)
                .margin(config.style.margins.top as i32)
                .x_label_area_size(config.style.margins.bottom)
                .y_label_area_size(config.style.margins.left)
                .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

            chart
                .configure_mesh()
                .x_desc(config.x_label.as_deref().unwrap_or("Date"))
                .y_desc(config.y_label.as_deref().unwrap_or("Number of Incidents"))
                .x_label_formatter(&|x| Self::format_x_label(*x))
                .draw()?;

            let colors = self.get_colors(&config.style.color_scheme);
            for (i, series) in self.series.iter().enumerate() {
                let base = colors[i % colors.len()];
                let alpha = if self.is_highlighted(&series.name) {
                    1.0
                } else {
                    self.muted_alpha
                };
                let color = base.mix(alpha);

                let line_data: Vec<(f64, f64)> = series
                    .points
                    .iter()
                    .map(|(date, count)| (Self::date_to_x_value(date), *count as f64))
                    .collect();

                chart
                    .draw_series(LineSeries::new(line_data, color.stroke_width(2)))?
                    .label(series.name.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 10, y)], color.stroke_width(2))
                    });
            }

            if self.series.len() > 1 {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperLeft)
                    .border_style(TRANSPARENT)
                    .background_style(TRANSPARENT)
                    .draw()?;
            }

            root.present()?;
        }

        let html = html_document(&config.title, "", &svg);
        write_html(path, &html)?;
        tracing::info!("Successfully rendered category trends chart to {}", path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "category_trends"
    }
}
