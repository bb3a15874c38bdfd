use crate::region::RegionCode;
use awd_utils::{dates::year_month, months::month_name};
use chrono::naive::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

/// One of the two per-observation quantities the dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Estimated burnt area in km².
    EstimatedFireArea,
    /// Count of satellite pixels for presumed vegetation fires.
    PixelCount,
}

impl Metric {
    /// Both metrics, in chart order.
    pub const ALL: [Metric; 2] = [Metric::EstimatedFireArea, Metric::PixelCount];

    /// Column header carrying this metric in the source CSV.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::EstimatedFireArea => "Estimated_fire_area",
            Metric::PixelCount => "Count",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::EstimatedFireArea => f.write_str("estimated_fire_area"),
            Metric::PixelCount => f.write_str("pixel_count"),
        }
    }
}

/// A single fire-detection record, normalized from the source CSV.
///
/// `year` and `month` are derived from `date` at load time and never
/// disagree with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub region: RegionCode,
    pub date: NaiveDate,
    pub year: i32,
    /// Month number, 1 = January.
    pub month: u32,
    pub estimated_fire_area: f64,
    pub pixel_count: f64,
}

impl Observation {
    /// Build an observation, deriving `year` and `month` from `date`.
    pub fn new(
        region: RegionCode,
        date: NaiveDate,
        estimated_fire_area: f64,
        pixel_count: f64,
    ) -> Self {
        let (year, month) = year_month(&date);
        Observation {
            region,
            date,
            year,
            month,
            estimated_fire_area,
            pixel_count,
        }
    }

    /// English month name of the observation date.
    pub fn month_name(&self) -> &'static str {
        month_name(self.month).unwrap_or("Unknown")
    }

    /// The value of `metric` on this record.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::EstimatedFireArea => self.estimated_fire_area,
            Metric::PixelCount => self.pixel_count,
        }
    }
}

impl Ord for Observation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.region.cmp(&other.region))
            .then_with(|| self.estimated_fire_area.total_cmp(&other.estimated_fire_area))
            .then_with(|| self.pixel_count.total_cmp(&other.pixel_count))
    }
}

impl Eq for Observation {}

impl PartialEq for Observation {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
            && self.region == other.region
            && self.estimated_fire_area == other.estimated_fire_area
            && self.pixel_count == other.pixel_count
    }
}

impl PartialOrd for Observation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
