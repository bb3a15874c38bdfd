//! Drive the dashboard from filter events on stdin.
//!
//! One event per line:
//!
//! ```text
//! region QL
//! year 2011
//! set VI 2009
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use crate::source::SourceArgs;
use anyhow::{anyhow, bail};
use awd_core::filter::FilterState;
use awd_core::region::RegionCode;
use awd_dashboard::chart::ChartSpec;
use awd_dashboard::options::FilterOptions;
use awd_dashboard::{Dashboard, DashboardState, MapSlot, Output, Reaction, Slot};
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

fn parse_year(raw: &str) -> anyhow::Result<i32> {
    raw.parse().map_err(|_| anyhow!("invalid year '{}'", raw))
}

/// Apply one event line to `current`. `Ok(None)` for lines with no event.
pub fn parse_event(line: &str, current: FilterState) -> anyhow::Result<Option<FilterState>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let parts: Vec<&str> = line.split_whitespace().collect();
    let next = match parts.as_slice() {
        ["region", code] => current.with_region(code.parse::<RegionCode>()?),
        ["year", year] => current.with_year(parse_year(year)?),
        ["set", code, year] => FilterState::new(code.parse::<RegionCode>()?, parse_year(year)?),
        _ => bail!("unrecognized event '{}'", line),
    };
    Ok(Some(next))
}

/// One line describing what a reaction did and what is on screen.
pub fn summarize(reaction: &Reaction, state: &DashboardState) -> String {
    let recomputed = if reaction.recomputed.is_empty() {
        "nothing".to_string()
    } else {
        reaction
            .recomputed
            .iter()
            .map(|o| match o {
                Output::AreaChart => "area",
                Output::PixelChart => "pixels",
                Output::Weather => "weather",
                Output::Map => "map",
            })
            .collect::<Vec<_>>()
            .join(",")
    };
    let count = |slot: &Option<Slot<ChartSpec>>| {
        slot.as_ref().map(|s| s.content.category_count()).unwrap_or(0)
    };
    let weather = state
        .weather
        .as_ref()
        .map(|s| {
            format!(
                "{} {} ({})",
                s.content.temperature, s.content.condition, s.content.location_label
            )
        })
        .unwrap_or_else(|| "-".to_string());
    let map = match state.map.as_ref().map(|s| &s.content) {
        Some(MapSlot::Ready(snap)) => {
            format!("ready @ {:.4},{:.4}", snap.coordinates.lat, snap.coordinates.lon)
        }
        Some(MapSlot::Failed { message }) => format!("error: {}", message),
        None => "-".to_string(),
    };
    format!(
        "[rev {}] {} {} | recomputed: {} | area months: {} | pixel months: {} | weather: {} | map: {}",
        reaction.revision,
        reaction.filter.region,
        reaction.filter.year,
        recomputed,
        count(&state.area_chart),
        count(&state.pixel_chart),
        weather,
        map
    )
}

pub async fn run_watch(source: &SourceArgs, offline: bool) -> anyhow::Result<()> {
    let config = source.config()?;
    let store = source.load_store(&config).await?;
    let options = FilterOptions::from_store(&store)?;
    let mut filter = options.validate_default(config.default_filter());
    let mut dashboard = Dashboard::from_config(store, &config, offline);

    let reaction = dashboard.react(filter).await;
    println!("{}", summarize(&reaction, dashboard.state()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_event(&line, filter) {
            Ok(Some(next)) => {
                filter = next;
                let reaction = dashboard.react(filter).await;
                println!("{}", summarize(&reaction, dashboard.state()));
            }
            Ok(None) => {}
            Err(e) => warn!("Ignoring event: {}", e),
        }
    }
    info!("Input closed after revision {}", dashboard.state().revision);
    Ok(())
}
