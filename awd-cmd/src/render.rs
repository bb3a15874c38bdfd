//! Render one dashboard view to disk.

use crate::source::SourceArgs;
use anyhow::Context;
use awd_core::region::RegionCode;
use awd_dashboard::config::DashboardConfig;
use awd_dashboard::options::FilterOptions;
use awd_dashboard::page::render_page;
use awd_dashboard::{Dashboard, MapSlot};
use awd_db::DatasetStore;
use log::{info, warn};
use std::path::Path;

fn write_file(dir: &Path, name: &str, content: &str) -> anyhow::Result<()> {
    let path = dir.join(name);
    std::fs::write(&path, content).with_context(|| format!("writing {}", path.display()))
}

/// Run a single reaction for the chosen filter and write every output slot
/// plus `dashboard.html` into `out`.
///
/// The map hand-off file is `out/map.html`. When the map build fails its
/// message goes to `map_error.txt` instead and the other files are still
/// written.
pub async fn render_to_dir(
    store: DatasetStore,
    mut config: DashboardConfig,
    region: Option<RegionCode>,
    year: Option<i32>,
    out: &Path,
    offline: bool,
) -> anyhow::Result<()> {
    std::fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    config.snapshot_path = out.join("map.html");

    let options = FilterOptions::from_store(&store)?;
    let mut filter = options.validate_default(config.default_filter());
    if let Some(region) = region {
        filter = filter.with_region(region);
    }
    if let Some(year) = year {
        filter = filter.with_year(year);
    }

    let mut dashboard = Dashboard::from_config(store, &config, offline);
    let reaction = dashboard.react(filter).await;
    let state = dashboard.state();

    if let Some(slot) = &state.area_chart {
        let figure = serde_json::to_string_pretty(&slot.content.to_plotly())?;
        write_file(out, "area_chart.json", &figure)?;
    }
    if let Some(slot) = &state.pixel_chart {
        let figure = serde_json::to_string_pretty(&slot.content.to_plotly())?;
        write_file(out, "pixel_chart.json", &figure)?;
    }
    if let Some(slot) = &state.weather {
        write_file(out, "weather.json", &serde_json::to_string_pretty(&slot.content)?)?;
    }
    if let Some(MapSlot::Failed { message }) = state.map.as_ref().map(|s| &s.content) {
        warn!("Map unavailable: {}", message);
        write_file(out, "map_error.txt", message)?;
    }
    write_file(out, "dashboard.html", &render_page(state, &options))?;

    info!(
        "Rendered {} {} (revision {}) to {}",
        reaction.filter.region,
        reaction.filter.year,
        reaction.revision,
        out.display()
    );
    Ok(())
}

pub async fn run_render(
    source: &SourceArgs,
    region: Option<RegionCode>,
    year: Option<i32>,
    out: &Path,
    offline: bool,
) -> anyhow::Result<()> {
    let config = source.config()?;
    let store = source.load_store(&config).await?;
    render_to_dir(store, config, region, year, out, offline).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Region,Date,Estimated_fire_area,Count
NSW,1/4/2005,10,4
QL,2/5/2006,7,3
QL,2/9/2006,3,1
";

    fn offline_config() -> DashboardConfig {
        DashboardConfig {
            lookup_timeout_secs: 1,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn writes_every_output() {
        let dir = tempfile::tempdir().unwrap();
        let store = DatasetStore::from_csv(SAMPLE).unwrap();
        render_to_dir(
            store,
            offline_config(),
            Some(RegionCode::Queensland),
            Some(2006),
            dir.path(),
            true,
        )
        .await
        .unwrap();

        for name in [
            "area_chart.json",
            "pixel_chart.json",
            "weather.json",
            "map.html",
            "dashboard.html",
        ] {
            assert!(dir.path().join(name).exists(), "missing {}", name);
        }
        assert!(!dir.path().join("map_error.txt").exists());

        let area: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("area_chart.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(area["data"][0]["labels"], serde_json::json!(["February"]));
        assert_eq!(area["data"][0]["values"], serde_json::json!([5.0]));

        let weather = std::fs::read_to_string(dir.path().join("weather.json")).unwrap();
        assert!(weather.contains("\"N/A\""));
        assert!(weather.contains("Brisbane"));
    }

    #[tokio::test]
    async fn defaults_to_configured_filter() {
        let dir = tempfile::tempdir().unwrap();
        let store = DatasetStore::from_csv(SAMPLE).unwrap();
        render_to_dir(store, offline_config(), None, None, dir.path(), true)
            .await
            .unwrap();
        let page = std::fs::read_to_string(dir.path().join("dashboard.html")).unwrap();
        assert!(page.contains("NSW : Monthly Average Estimated Fire Area in 2005"));
    }
}
