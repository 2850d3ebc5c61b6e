//! CSV loading and aggregation for crime-incident datasets

pub mod aggregate;
pub mod incident;

pub use aggregate::{
    clean_coordinates, dense_hourly_counts, dense_monthly_counts, filter_by_category, heat_frames,
    in_bounding_box, monthly_category_series, top_categories, CategorySeries, HeatFrames,
    MonthlyCount, YearHourCounts, LATITUDE_BOUNDS, LONGITUDE_BOUNDS,
};
pub use incident::{hour_from_time, load_incidents, Incident, REQUIRED_COLUMNS};
