use crate::region::RegionCode;
use serde::{Deserialize, Serialize};

/// Region shown when the dashboard starts.
pub const DEFAULT_REGION: RegionCode = RegionCode::NewSouthWales;

/// Year shown when the dashboard starts.
pub const DEFAULT_YEAR: i32 = 2005;

/// One of the two filter controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Region,
    Year,
}

/// The complete filter selection. Always fully specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterState {
    pub region: RegionCode,
    pub year: i32,
}

impl FilterState {
    pub fn new(region: RegionCode, year: i32) -> Self {
        FilterState { region, year }
    }

    /// Fields whose value differs from `previous`, region first.
    pub fn changed_fields(&self, previous: &FilterState) -> Vec<FilterField> {
        let mut changed = Vec::with_capacity(2);
        if self.region != previous.region {
            changed.push(FilterField::Region);
        }
        if self.year != previous.year {
            changed.push(FilterField::Year);
        }
        changed
    }

    /// Copy of this state with the region replaced.
    pub fn with_region(self, region: RegionCode) -> Self {
        FilterState { region, ..self }
    }

    /// Copy of this state with the year replaced.
    pub fn with_year(self, year: i32) -> Self {
        FilterState { year, ..self }
    }
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState::new(DEFAULT_REGION, DEFAULT_YEAR)
    }
}
