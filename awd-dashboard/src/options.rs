//! Choices offered by the two filter controls.

use awd_core::{filter::FilterState, region::RegionCode};
use awd_db::DatasetStore;
use log::warn;
use serde::Serialize;

/// A radio option for the region control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionOption {
    pub label: &'static str,
    pub value: RegionCode,
}

/// Region and year choices for the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub regions: Vec<RegionOption>,
    /// Distinct dataset years, ascending.
    pub years: Vec<i32>,
}

impl FilterOptions {
    /// All seven regions plus the years present in `years`, sorted and
    /// deduplicated.
    pub fn new(mut years: Vec<i32>) -> Self {
        years.sort_unstable();
        years.dedup();
        FilterOptions {
            regions: RegionCode::ALL
                .into_iter()
                .map(|value| RegionOption {
                    label: value.display_name(),
                    value,
                })
                .collect(),
            years,
        }
    }

    pub fn from_store(store: &DatasetStore) -> anyhow::Result<Self> {
        Ok(Self::new(store.distinct_years()?))
    }

    /// `preferred`, with its year replaced by the earliest available year
    /// if the dataset has no such year.
    pub fn validate_default(&self, preferred: FilterState) -> FilterState {
        if self.years.contains(&preferred.year) {
            return preferred;
        }
        match self.years.first() {
            Some(&first) => {
                warn!(
                    "options: default year {} not in dataset, starting at {}",
                    preferred.year, first
                );
                preferred.with_year(first)
            }
            None => preferred,
        }
    }
}
