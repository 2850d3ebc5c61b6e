//! Aggregation pipeline turning incident records into chart-ready buckets

use crate::Incident;
use chrono::{Datelike, NaiveDate};
use crimeviz_common::Result;
use std::collections::HashMap;
use tracing::debug;

/// Accepted latitude interval, exclusive bounds. A geocoding sanity box,
/// not a precise city boundary.
pub const LATITUDE_BOUNDS: (f64, f64) = (37.5, 40.0);
/// Accepted longitude interval, exclusive bounds
pub const LONGITUDE_BOUNDS: (f64, f64) = (-123.0, -122.25);

/// One named line-chart series, ordered by date ascending
#[derive(Debug, Clone)]
pub struct CategorySeries {
    pub name: String,
    /// (first day of month, incident count), sorted ascending
    pub points: Vec<(NaiveDate, u32)>,
}

/// Zero-filled count for one (year, month) cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyCount {
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub count: u32,
}

/// Dense 24-slot hour counts for one year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearHourCounts {
    pub year: i32,
    pub counts: [u32; 24],
}

impl YearHourCounts {
    /// Largest hour count of this year
    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Per-year coordinate frames for the time-animated heat map.
///
/// `frames.len() == labels.len()` always holds, and `frames[i]` contains
/// only coordinates of records whose year equals `labels[i]`. Years with no
/// matching records keep an empty frame to preserve index alignment.
#[derive(Debug, Clone)]
pub struct HeatFrames {
    pub labels: Vec<String>,
    pub frames: Vec<Vec<(f64, f64)>>,
}

/// Case-insensitive exact-match category filter
pub fn filter_by_category<'a>(incidents: &'a [Incident], category: &str) -> Vec<&'a Incident> {
    let target = category.to_lowercase();
    incidents
        .iter()
        .filter(|incident| incident.category.to_lowercase() == target)
        .collect()
}

/// Select the N most frequent category labels by total record count.
///
/// Ties are broken by category name purely to keep runs reproducible; which
/// tied categories make the cut is implementation-defined. Categories that
/// strictly outrank the tie group always appear.
pub fn top_categories(incidents: &[Incident], n: usize) -> Vec<String> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for incident in incidents {
        *counts.entry(incident.category.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(n)
        .map(|(category, _)| category.to_string())
        .collect()
}

/// Aggregate monthly counts per category, one ordered series per category.
///
/// Only months actually present in the data appear; the dense-grid fill
/// applies to the (year, month) and (year, hour) aggregations, not here.
pub fn monthly_category_series(incidents: &[Incident], categories: &[String]) -> Vec<CategorySeries> {
    let mut buckets: HashMap<(&str, NaiveDate), u32> = HashMap::new();
    for incident in incidents {
        let Some(category) = categories.iter().find(|c| c.as_str() == incident.category) else {
            continue;
        };
        let month_start =
            NaiveDate::from_ymd_opt(incident.date.year(), incident.date.month(), 1)
                .expect("first of month is always valid");
        *buckets.entry((category.as_str(), month_start)).or_insert(0) += 1;
    }

    categories
        .iter()
        .map(|category| {
            let mut points: Vec<(NaiveDate, u32)> = buckets
                .iter()
                .filter(|((name, _), _)| *name == category.as_str())
                .map(|((_, date), count)| (*date, *count))
                .collect();
            points.sort_by_key(|(date, _)| *date);
            CategorySeries {
                name: category.clone(),
                points,
            }
        })
        .collect()
}

/// Dense (year, month) counts for one category over an inclusive year range.
///
/// Every combination in the declared domain is present, zero-filled where no
/// input matches.
pub fn dense_monthly_counts(
    incidents: &[Incident],
    category: &str,
    start_year: i32,
    end_year: i32,
) -> Vec<MonthlyCount> {
    let filtered = filter_by_category(incidents, category);

    let mut buckets: HashMap<(i32, u32), u32> = HashMap::new();
    for incident in &filtered {
        let key = (incident.date.year(), incident.date.month());
        *buckets.entry(key).or_insert(0) += 1;
    }

    let mut cells = Vec::with_capacity(((end_year - start_year + 1) * 12).max(0) as usize);
    for year in start_year..=end_year {
        for month in 1..=12 {
            cells.push(MonthlyCount {
                year,
                month,
                count: buckets.get(&(year, month)).copied().unwrap_or(0),
            });
        }
    }
    debug!(
        cells = cells.len(),
        category, "Built dense monthly count grid"
    );
    cells
}

/// Dense (year, hour) counts for one category over an inclusive year range.
///
/// Hour derivation follows the time-string policy in
/// [`crate::hour_from_time`]; an out-of-range hour (>= 24) is ignored the
/// same way a record outside the year range is.
pub fn dense_hourly_counts(
    incidents: &[Incident],
    category: &str,
    start_year: i32,
    end_year: i32,
) -> Result<Vec<YearHourCounts>> {
    let filtered = filter_by_category(incidents, category);

    let mut years: Vec<YearHourCounts> = (start_year..=end_year)
        .map(|year| YearHourCounts {
            year,
            counts: [0; 24],
        })
        .collect();

    for incident in &filtered {
        if incident.year < start_year || incident.year > end_year {
            continue;
        }
        let hour = incident.hour()?;
        if hour >= 24 {
            continue;
        }
        let index = (incident.year - start_year) as usize;
        years[index].counts[hour as usize] += 1;
    }

    Ok(years)
}

/// Whether a coordinate pair falls inside the accepted bounding box
pub fn in_bounding_box(latitude: f64, longitude: f64) -> bool {
    latitude > LATITUDE_BOUNDS.0
        && latitude < LATITUDE_BOUNDS.1
        && longitude > LONGITUDE_BOUNDS.0
        && longitude < LONGITUDE_BOUNDS.1
}

/// Drop records without coordinates, then records outside the bounding box
pub fn clean_coordinates<'a, I>(incidents: I) -> Vec<&'a Incident>
where
    I: IntoIterator<Item = &'a Incident>,
{
    incidents
        .into_iter()
        .filter(|incident| match (incident.latitude, incident.longitude) {
            (Some(lat), Some(lon)) => in_bounding_box(lat, lon),
            _ => false,
        })
        .collect()
}

/// Build per-year coordinate frames for the time-animated heat map.
///
/// The optional category filter is applied first, then coordinate cleaning.
/// One frame per year in the inclusive range, empty where no records match.
pub fn heat_frames(
    incidents: &[Incident],
    category: Option<&str>,
    start_year: i32,
    end_year: i32,
) -> HeatFrames {
    let by_category: Vec<&Incident> = match category {
        Some(category) => filter_by_category(incidents, category),
        None => incidents.iter().collect(),
    };
    let cleaned = clean_coordinates(by_category);

    let mut labels = Vec::new();
    let mut frames = Vec::new();
    for year in start_year..=end_year {
        let coordinates: Vec<(f64, f64)> = cleaned
            .iter()
            .filter(|incident| incident.year == year)
            .map(|incident| {
                (
                    incident.latitude.expect("cleaned records have coordinates"),
                    incident.longitude.expect("cleaned records have coordinates"),
                )
            })
            .collect();
        labels.push(year.to_string());
        frames.push(coordinates);
    }

    HeatFrames { labels, frames }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(
        date: (i32, u32, u32),
        time: &str,
        category: &str,
        coords: Option<(f64, f64)>,
    ) -> Incident {
        Incident {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            time: time.to_string(),
            category: category.to_string(),
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
            year: date.0,
        }
    }

    #[test]
    fn test_filter_by_category_case_insensitive() {
        let incidents = vec![
            incident((2018, 1, 1), "10:00", "Motor Vehicle Theft", None),
            incident((2018, 1, 2), "11:00", "motor vehicle theft", None),
            incident((2018, 1, 3), "12:00", "Assault", None),
        ];

        let filtered = filter_by_category(&incidents, "MOTOR VEHICLE THEFT");
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_top_categories_includes_strictly_ranked() {
        // A:100, B:90, C:80, D/E/F/G tied at 5
        let mut incidents = Vec::new();
        for (category, count) in [
            ("A", 100),
            ("B", 90),
            ("C", 80),
            ("D", 5),
            ("E", 5),
            ("F", 5),
            ("G", 5),
        ] {
            for _ in 0..count {
                incidents.push(incident((2018, 1, 1), "10:00", category, None));
            }
        }

        let top = top_categories(&incidents, 6);
        assert_eq!(top.len(), 6);
        // The strictly higher-ranked categories always appear
        assert!(top.contains(&"A".to_string()));
        assert!(top.contains(&"B".to_string()));
        assert!(top.contains(&"C".to_string()));
        // The remaining three come from the tie group
        let tie_members = top
            .iter()
            .filter(|c| ["D", "E", "F", "G"].contains(&c.as_str()))
            .count();
        assert_eq!(tie_members, 3);
    }

    #[test]
    fn test_monthly_category_series_sorted() {
        let incidents = vec![
            incident((2018, 3, 10), "10:00", "Assault", None),
            incident((2018, 1, 5), "10:00", "Assault", None),
            incident((2018, 1, 20), "10:00", "Assault", None),
            incident((2018, 2, 1), "10:00", "Burglary", None),
        ];

        let series =
            monthly_category_series(&incidents, &["Assault".to_string(), "Burglary".to_string()]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "Assault");
        assert_eq!(
            series[0].points,
            vec![
                (NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(), 2),
                (NaiveDate::from_ymd_opt(2018, 3, 1).unwrap(), 1),
            ]
        );
        assert_eq!(series[1].points.len(), 1);
    }

    #[test]
    fn test_dense_monthly_counts_zero_fill() {
        // No motor vehicle thefts in (2004, 3); the cell must still exist
        let incidents = vec![
            incident((2004, 1, 10), "10:00", "Motor Vehicle Theft", None),
            incident((2005, 6, 2), "10:00", "Motor Vehicle Theft", None),
        ];

        let cells = dense_monthly_counts(&incidents, "motor vehicle theft", 2004, 2005);
        assert_eq!(cells.len(), 24);

        let march_2004 = cells
            .iter()
            .find(|c| c.year == 2004 && c.month == 3)
            .expect("dense grid must contain every declared cell");
        assert_eq!(march_2004.count, 0);

        let jan_2004 = cells.iter().find(|c| c.year == 2004 && c.month == 1).unwrap();
        assert_eq!(jan_2004.count, 1);
    }

    #[test]
    fn test_dense_hourly_counts() {
        let incidents = vec![
            incident((2018, 1, 1), "14:32", "Theft", None),
            incident((2018, 1, 2), "14:05", "Theft", None),
            incident((2018, 1, 3), "noon", "Theft", None),
            incident((2019, 1, 1), "03:00", "Theft", None),
            incident((2020, 1, 1), "03:00", "Theft", None), // Outside range
        ];

        let years = dense_hourly_counts(&incidents, "theft", 2018, 2019).unwrap();
        assert_eq!(years.len(), 2);
        assert_eq!(years[0].year, 2018);
        assert_eq!(years[0].counts[14], 2);
        // The colon-free time collapses to hour 0
        assert_eq!(years[0].counts[0], 1);
        assert_eq!(years[1].counts[3], 1);
        assert_eq!(years[1].max_count(), 1);
    }

    #[test]
    fn test_bounding_box() {
        assert!(in_bounding_box(38.0, -122.5));
        assert!(!in_bounding_box(41.0, -122.5)); // Latitude too high
        assert!(!in_bounding_box(37.0, -122.5)); // Latitude too low
        assert!(!in_bounding_box(38.0, -124.0)); // Longitude too low
        assert!(!in_bounding_box(38.0, -122.0)); // Longitude too high
    }

    #[test]
    fn test_clean_coordinates() {
        let incidents = vec![
            incident((2018, 1, 1), "10:00", "Theft", Some((38.0, -122.5))),
            incident((2018, 1, 2), "10:00", "Theft", Some((41.0, -122.5))),
            incident((2018, 1, 3), "10:00", "Theft", None),
        ];

        let cleaned = clean_coordinates(incidents.iter());
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].latitude, Some(38.0));
    }

    #[test]
    fn test_heat_frames_index_alignment() {
        let incidents = vec![
            incident((2003, 1, 1), "10:00", "Theft", Some((37.8, -122.4))),
            incident((2005, 1, 1), "10:00", "Theft", Some((37.9, -122.3))),
            incident((2005, 2, 1), "10:00", "Theft", Some((37.7, -122.5))),
        ];

        let frames = heat_frames(&incidents, Some("theft"), 2003, 2024);
        assert_eq!(frames.labels.len(), 22);
        assert_eq!(frames.frames.len(), 22);
        assert_eq!(frames.labels[0], "2003");
        assert_eq!(frames.frames[0].len(), 1);
        // A year with no records keeps an empty frame
        assert_eq!(frames.labels[1], "2004");
        assert!(frames.frames[1].is_empty());
        assert_eq!(frames.frames[2].len(), 2);
    }

    #[test]
    fn test_heat_frames_without_category_filter() {
        let incidents = vec![
            incident((2003, 1, 1), "10:00", "Theft", Some((37.8, -122.4))),
            incident((2003, 1, 2), "10:00", "Assault", Some((37.8, -122.4))),
        ];

        let frames = heat_frames(&incidents, None, 2003, 2003);
        assert_eq!(frames.frames[0].len(), 2);
    }
}
