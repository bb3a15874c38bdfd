//! Where the dataset and config come from.

use awd_core::dataset::{fetch_dataset, read_dataset_file};
use awd_dashboard::config::DashboardConfig;
use awd_db::DatasetStore;
use clap::Args;
use log::info;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Local dataset CSV (skips the download)
    #[arg(short = 'd', long, conflicts_with = "url")]
    pub data: Option<PathBuf>,

    /// Dataset URL (defaults to the configured one)
    #[arg(long)]
    pub url: Option<String>,

    /// JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// The config at `path`, or defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<DashboardConfig> {
    match path {
        Some(p) => DashboardConfig::load(p),
        None => Ok(DashboardConfig::default()),
    }
}

impl SourceArgs {
    pub fn config(&self) -> anyhow::Result<DashboardConfig> {
        load_config(self.config.as_deref())
    }

    /// Load the dataset into a store. Any load failure aborts startup.
    pub async fn load_store(&self, config: &DashboardConfig) -> anyhow::Result<DatasetStore> {
        let raw = match &self.data {
            Some(path) => {
                info!("Loading dataset from {}", path.display());
                read_dataset_file(path)?
            }
            None => {
                let url = self.url.as_deref().unwrap_or(&config.dataset_url);
                info!("Downloading dataset from {}", url);
                fetch_dataset(url, config.dataset_timeout()).await?
            }
        };
        let store = DatasetStore::from_csv(&raw)?;
        let summary = store.summary()?;
        info!(
            "Dataset loaded: {} rows, {} to {}, {} years",
            summary.rows,
            summary.first_date,
            summary.last_date,
            summary.years.len()
        );
        Ok(store)
    }
}
