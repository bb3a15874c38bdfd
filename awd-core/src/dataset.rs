//! Normalization of the historical wildfire CSV into [`Observation`]s.
//!
//! The source file carries one row per region per detection date with many
//! brightness/confidence columns. Only four are kept:
//!
//! | Column                | Field                 |
//! |-----------------------|-----------------------|
//! | `Region`              | `region`              |
//! | `Date`                | `date` (+ year/month) |
//! | `Estimated_fire_area` | `estimated_fire_area` |
//! | `Count`               | `pixel_count`         |

use crate::error::{DataLoadError, Result};
use crate::observation::{Metric, Observation};
use crate::region::RegionCode;
use awd_utils::dates::parse_dataset_date;
use csv::{ReaderBuilder, StringRecord};
use log::info;
use std::path::Path;

/// Published location of the historical wildfire dataset.
pub const DEFAULT_DATASET_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/Historical_Wildfires.csv";

const REGION_COLUMN: &str = "Region";
const DATE_COLUMN: &str = "Date";

/// Header positions of the columns the dashboard reads.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    region: usize,
    date: usize,
    area: usize,
    count: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(DataLoadError::MissingColumn(name))
        };
        Ok(ColumnIndex {
            region: find(REGION_COLUMN)?,
            date: find(DATE_COLUMN)?,
            area: find(Metric::EstimatedFireArea.column())?,
            count: find(Metric::PixelCount.column())?,
        })
    }
}

fn malformed(record: &StringRecord, reason: String) -> DataLoadError {
    DataLoadError::Malformed {
        line: record.position().map(|p| p.line()).unwrap_or(0),
        reason,
    }
}

fn parse_metric(record: &StringRecord, idx: usize, metric: Metric) -> Result<f64> {
    let raw = record.get(idx).unwrap_or("").trim();
    let value: f64 = raw
        .parse()
        .map_err(|_| malformed(record, format!("{} '{}' is not a number", metric, raw)))?;
    if !value.is_finite() || value < 0.0 {
        return Err(malformed(
            record,
            format!("{} '{}' must be a non-negative number", metric, raw),
        ));
    }
    Ok(value)
}

fn record_to_observation(record: &StringRecord, cols: &ColumnIndex) -> Result<Observation> {
    let region_raw = record.get(cols.region).unwrap_or("");
    let region: RegionCode = region_raw
        .parse()
        .map_err(|e| malformed(record, format!("{}", e)))?;
    let date = parse_dataset_date(record.get(cols.date).unwrap_or(""))
        .map_err(|e| malformed(record, e.to_string()))?;
    let area = parse_metric(record, cols.area, Metric::EstimatedFireArea)?;
    let count = parse_metric(record, cols.count, Metric::PixelCount)?;
    Ok(Observation::new(region, date, area, count))
}

/// Parse the wildfire CSV (with headers) into observations sorted by date.
///
/// Any row that cannot be normalized fails the whole load: a partially
/// loaded table would silently skew every monthly mean.
pub fn parse_observations(csv_data: &str) -> Result<Vec<Observation>> {
    let (observations, skipped) = normalize_rows(csv_data)?;
    info!(
        "dataset: normalized {} observations, skipped {} blank rows",
        observations.len(),
        skipped
    );
    Ok(observations)
}

/// Observations plus the number of all-blank rows passed over.
fn normalize_rows(csv_data: &str) -> Result<(Vec<Observation>, usize)> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());
    let cols = ColumnIndex::from_headers(rdr.headers()?)?;

    let mut observations = Vec::new();
    let mut skipped = 0;
    for result in rdr.records() {
        let record = result?;
        if record.iter().all(|field| field.trim().is_empty()) {
            skipped += 1;
            continue;
        }
        observations.push(record_to_observation(&record, &cols)?);
    }
    if observations.is_empty() {
        return Err(DataLoadError::Empty);
    }
    observations.sort();
    Ok((observations, skipped))
}

/// Read a local copy of the dataset.
pub fn read_dataset_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    info!("dataset: reading {}", path.display());
    Ok(std::fs::read_to_string(path)?)
}

/// Download the dataset CSV. Transport errors and non-success statuses
/// are reported as [`DataLoadError::Unreachable`]; there are no retries.
#[cfg(feature = "api")]
pub async fn fetch_dataset(url: &str, timeout: std::time::Duration) -> Result<String> {
    let unreachable = |e: reqwest::Error| DataLoadError::Unreachable(format!("{}: {}", url, e));
    info!("dataset: fetching {}", url);
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(unreachable)?;
    let response = client.get(url).send().await.map_err(unreachable)?;
    if !response.status().is_success() {
        return Err(DataLoadError::Unreachable(format!(
            "{}: status {}",
            url,
            response.status()
        )));
    }
    let body = response.text().await.map_err(unreachable)?;
    info!("dataset: downloaded {} bytes", body.len());
    Ok(body)
}
