//! Dataset commands: list years, download the CSV.

use crate::source::{load_config, SourceArgs};
use anyhow::Context;
use awd_core::dataset::fetch_dataset;
use log::info;
use std::path::Path;

/// Print the dataset's distinct years, one per line, ascending.
pub async fn run_years(source: &SourceArgs) -> anyhow::Result<()> {
    let config = source.config()?;
    let store = source.load_store(&config).await?;
    for year in store.distinct_years()? {
        println!("{}", year);
    }
    Ok(())
}

/// Download the dataset CSV to `out`.
pub async fn run_fetch(
    out: &Path,
    url: Option<&str>,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let url = url.unwrap_or(&config.dataset_url);
    info!("Fetching dataset from {}", url);
    let body = fetch_dataset(url, config.dataset_timeout()).await?;
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(out, &body).with_context(|| format!("writing {}", out.display()))?;
    info!("Wrote {} bytes to {}", body.len(), out.display());
    Ok(())
}
