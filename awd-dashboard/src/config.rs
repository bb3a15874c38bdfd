//! Dashboard configuration.
//!
//! Every field has a default, so a JSON config file only needs the keys it
//! overrides:
//!
//! ```json
//! { "lookup_timeout_secs": 2, "default_region": "VI" }
//! ```

use anyhow::Context;
use awd_core::{
    dataset::DEFAULT_DATASET_URL,
    filter::{FilterState, DEFAULT_REGION, DEFAULT_YEAR},
    region::RegionCode,
};
use awd_enrich::http::{IPINFO_URL, WTTR_URL};
use awd_map::snapshot::DEFAULT_SNAPSHOT_PATH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Remote wildfire CSV.
    pub dataset_url: String,
    /// Bound on the dataset download.
    pub dataset_timeout_secs: u64,
    /// Viewer geolocation endpoint.
    pub location_url: String,
    /// Weather endpoint base.
    pub weather_url: String,
    /// Bound on each geolocation/weather call.
    pub lookup_timeout_secs: u64,
    /// Hand-off file for the map document.
    pub snapshot_path: PathBuf,
    pub default_region: RegionCode,
    pub default_year: i32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            dataset_timeout_secs: 60,
            location_url: IPINFO_URL.to_string(),
            weather_url: WTTR_URL.to_string(),
            lookup_timeout_secs: 5,
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            default_region: DEFAULT_REGION,
            default_year: DEFAULT_YEAR,
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file; absent keys keep their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    pub fn dataset_timeout(&self) -> Duration {
        Duration::from_secs(self.dataset_timeout_secs)
    }

    pub fn default_filter(&self) -> FilterState {
        FilterState::new(self.default_region, self.default_year)
    }
}
