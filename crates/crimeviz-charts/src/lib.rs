//! Chart geometry and rendering for crime-incident datasets

pub mod heat_map;
pub mod html;
pub mod month_heatmap;
pub mod polar;
pub mod renderer;
pub mod trends;
pub mod types;

pub use heat_map::YearlyHeatMapChart;
pub use month_heatmap::MonthHeatmapChart;
pub use polar::{wedges_for_year, HourlyPolarChart, Wedge};
pub use renderer::ChartRenderer;
pub use trends::CategoryTrendsChart;
pub use types::*;
