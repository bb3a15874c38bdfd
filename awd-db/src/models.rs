//! Query result model structs.

use awd_core::region::RegionCode;
use serde::Serialize;

/// Shape of the loaded table, reported once at startup and by the CLI.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetSummary {
    /// Number of observation rows.
    pub rows: u64,
    /// Distinct years, ascending.
    pub years: Vec<i32>,
    /// Regions that have at least one row, in filter-control order.
    pub regions: Vec<RegionCode>,
    /// Earliest observation date (YYYY-MM-DD).
    pub first_date: String,
    /// Latest observation date (YYYY-MM-DD).
    pub last_date: String,
}
