//! Incident record type and CSV loading

use chrono::NaiveDate;
use crimeviz_common::{CrimeVizError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Columns the loader requires in the input CSV header
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Incident Date",
    "Incident Time",
    "Incident Category",
    "Latitude",
    "Longitude",
    "Year",
];

/// Date formats accepted for the "Incident Date" column
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Raw CSV row as it appears in the source file
#[derive(Debug, Deserialize)]
struct RawIncident {
    #[serde(rename = "Incident Date")]
    date: String,
    #[serde(rename = "Incident Time")]
    time: String,
    #[serde(rename = "Incident Category")]
    category: String,
    #[serde(rename = "Latitude")]
    latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    longitude: Option<f64>,
    #[serde(rename = "Year")]
    year: i32,
}

/// One reported crime incident; immutable once loaded
#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
    /// Calendar date of the incident
    pub date: NaiveDate,
    /// Time-of-day string as recorded in the source, e.g. "14:32"
    pub time: String,
    /// Incident category label
    pub category: String,
    /// Latitude, absent when the record was not geocoded
    pub latitude: Option<f64>,
    /// Longitude, absent when the record was not geocoded
    pub longitude: Option<f64>,
    /// Calendar year from the source's own Year column
    pub year: i32,
}

impl Incident {
    /// Hour of day derived from the time string
    pub fn hour(&self) -> Result<u32> {
        hour_from_time(&self.time)
    }
}

/// Extract the hour of day from a time string.
///
/// The hour is the integer portion before the first ':'. A string with no
/// ':' at all collapses to hour 0; a pre-colon portion that is not an
/// integer is a data error.
pub fn hour_from_time(time: &str) -> Result<u32> {
    match time.split_once(':') {
        Some((prefix, _)) => prefix.trim().parse::<u32>().map_err(|_| {
            CrimeVizError::data_column(
                format!("unparsable time value '{}'", time),
                "Incident Time",
            )
        }),
        None => Ok(0),
    }
}

fn parse_incident_date(value: &str) -> Result<NaiveDate> {
    // The source mixes export formats; take the date part before any
    // trailing timestamp.
    let date_part = value.split_whitespace().next().unwrap_or(value);
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, format) {
            return Ok(date);
        }
    }
    Err(CrimeVizError::data_column(
        format!("unparsable date value '{}'", value),
        "Incident Date",
    ))
}

fn check_required_columns(headers: &csv::StringRecord) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(CrimeVizError::data_column(
                format!("missing required column '{}'", column),
                column,
            ));
        }
    }
    Ok(())
}

/// Load all incident records from a CSV file.
///
/// Fails on a missing/unreadable file, a missing required column, or an
/// unparsable date. There are no retries and no partial results.
pub fn load_incidents<P: AsRef<Path>>(path: P) -> Result<Vec<Incident>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new().from_path(path)?;

    check_required_columns(reader.headers()?)?;

    let mut incidents = Vec::new();
    for row in reader.deserialize::<RawIncident>() {
        let raw = row?;
        incidents.push(Incident {
            date: parse_incident_date(&raw.date)?,
            time: raw.time,
            category: raw.category,
            latitude: raw.latitude,
            longitude: raw.longitude,
            year: raw.year,
        });
    }

    info!(count = incidents.len(), path = %path.display(), "Loaded incident records");
    debug!("First record: {:?}", incidents.first());
    Ok(incidents)
}
