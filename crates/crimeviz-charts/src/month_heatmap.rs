//! Year-by-month grid heatmap

use crate::html::{html_document, write_html};
use crate::{ChartConfig, ChartRenderer, GradientPalette};
use async_trait::async_trait;
use crimeviz_common::{month_abbr, Result};
use crimeviz_data::MonthlyCount;
use plotters::prelude::*;
use std::path::Path;

/// Heatmap with one cell per (year, month), colored by a continuous
/// gradient normalized to the global maximum count.
///
/// The cells are a dense grid: every (year, month) combination of the
/// declared range is present, zero-filled where the source had no records.
#[derive(Debug)]
pub struct MonthHeatmapChart {
    /// Dense zero-filled grid cells
    pub cells: Vec<MonthlyCount>,
    /// First year of the grid (inclusive)
    pub start_year: i32,
    /// Last year of the grid (inclusive)
    pub end_year: i32,
    /// Continuous color palette
    pub palette: GradientPalette,
}

impl MonthHeatmapChart {
    /// Create a chart over the given inclusive year range
    pub fn new(start_year: i32, end_year: i32) -> Self {
        Self {
            cells: Vec::new(),
            start_year,
            end_year,
            palette: GradientPalette::iridescent(),
        }
    }

    /// Create a chart with custom title sized for a square grid
    pub fn with_config(title: &str, start_year: i32, end_year: i32) -> (Self, ChartConfig) {
        let chart = Self::new(start_year, end_year);
        let mut config = ChartConfig {
            title: title.to_string(),
            ..Default::default()
        };

        config.width = 600;
        config.height = 600;
        config.style.margins.bottom = 50;
        config.style.margins.left = 50;

        (chart, config)
    }

    /// Set the prepared dense grid
    pub fn set_cells(&mut self, cells: Vec<MonthlyCount>) {
        self.cells = cells;
    }

    fn year_count(&self) -> i32 {
        (self.end_year - self.start_year + 1).max(0)
    }

    /// Global maximum cell count, used to normalize the gradient
    fn max_count(&self) -> u32 {
        self.cells.iter().map(|c| c.count).max().unwrap_or(0)
    }

    fn cell_color(&self, count: u32, max_count: u32) -> RGBColor {
        let t = if max_count == 0 {
            0.0
        } else {
            count as f64 / max_count as f64
        };
        let (r, g, b) = self.palette.sample(t);
        RGBColor(r, g, b)
    }

    /// CSS color-bar legend appended below the SVG
    fn colorbar_html(&self, max_count: u32) -> String {
        let stops: Vec<String> = (0..=8)
            .map(|i| self.palette.sample_hex(i as f64 / 8.0))
            .collect();
        format!(
            "<div style=\"margin-top:8px;\">\n\
             <div style=\"width:300px;height:14px;background:linear-gradient(to right,{});\"></div>\n\
             <div style=\"display:flex;justify-content:space-between;width:300px;font-size:11px;\">\
             <span>0</span><span>{}</span></div>\n\
             </div>",
            stops.join(","),
            max_count
        )
    }
}

#[async_trait]
impl ChartRenderer for MonthHeatmapChart {
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        let max_count = self.max_count();
        let years = self.year_count();

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
                .into_drawing_area();
            let bg_color = self.get_background_color(config);
            root.fill(&bg_color)?;

            let title_font = (
                config.style.title_font.family.as_str(),
                config.style.title_font.size,
            );
            let mut chart = ChartBuilder::on(&root)
                .caption(&config.title, title_font)
                .margin(config.style.margins.top as i32)
                .x_label_area_size(config.style.margins.bottom)
                .y_label_area_size(config.style.margins.left)
                .build_cartesian_2d(0f64..years as f64, 0f64..12f64)?;

            let start_year = self.start_year;
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(years.min(26) as usize)
                .y_labels(12)
                .x_label_formatter(&move |x| {
                    let index = x.floor() as i32;
                    if index >= 0 && index < years {
                        (start_year + index).to_string()
                    } else {
                        String::new()
                    }
                })
                .y_label_formatter(&|y| {
                    let month = y.floor() as u32;
                    if month < 12 {
                        month_abbr(month + 1).to_string()
                    } else {
                        String::new()
                    }
                })
                .draw()?;

            chart.draw_series(self.cells.iter().map(|cell| {
                let x = (cell.year - self.start_year) as f64;
                let y = (cell.month - 1) as f64;
                Rectangle::new(
                    [(x, y), (x + 1.0, y + 1.0)],
                    self.cell_color(cell.count, max_count).filled(),
                )
            }))?;

            root.present()?;
        }

        let body = format!("{}\n{}", svg, self.colorbar_html(max_count));
        let html = html_document(&config.title, "", &body);
        write_html(path, &html)?;
        tracing::info!("Successfully rendered month heatmap to {}", path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "month_heatmap"
    }
}
