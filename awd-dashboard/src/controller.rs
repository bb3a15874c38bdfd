//! The reactive controller.
//!
//! [`Dashboard::react`] is the only transition. It takes `&mut self`, so one
//! filter event is fully processed before the next is accepted. Within a
//! reaction the chart slots are filled first (pure, infallible); the weather
//! lookup and map build then run side by side and land in their own slots.

use crate::chart::{area_chart, pixel_chart};
use crate::config::DashboardConfig;
use crate::state::{DashboardState, MapSlot, Output, Slot, WeatherPanel};
use awd_core::filter::FilterState;
use awd_core::observation::Metric;
use awd_data::aggregation::aggregate;
use awd_db::DatasetStore;
use awd_enrich::{EnrichmentResolver, LookupError, UnavailableLookup};
use awd_map::{MapSnapshotBuilder, SnapshotTarget};
use log::{info, warn};
use serde::Serialize;
use std::time::Duration;

/// What one filter event did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reaction {
    pub revision: u64,
    pub filter: FilterState,
    /// Outputs recomputed, in slot order. Empty when the filter did not change.
    pub recomputed: Vec<Output>,
}

impl Reaction {
    pub fn recomputed(&self, output: Output) -> bool {
        self.recomputed.contains(&output)
    }
}

fn offline_resolver(timeout: Duration) -> EnrichmentResolver {
    EnrichmentResolver::new(Box::new(UnavailableLookup), Box::new(UnavailableLookup), timeout)
}

fn live_or_offline(
    built: Result<EnrichmentResolver, LookupError>,
    timeout: Duration,
) -> EnrichmentResolver {
    built.unwrap_or_else(|e| {
        warn!("dashboard: weather lookups unavailable ({}), running offline", e);
        offline_resolver(timeout)
    })
}

/// Owns the dataset view, the enrichment resolver, the map builder and the
/// on-screen state.
pub struct Dashboard {
    store: DatasetStore,
    resolver: EnrichmentResolver,
    maps: MapSnapshotBuilder,
    state: DashboardState,
}

impl Dashboard {
    pub fn new(
        store: DatasetStore,
        resolver: EnrichmentResolver,
        maps: MapSnapshotBuilder,
    ) -> Self {
        Self {
            store,
            resolver,
            maps,
            state: DashboardState::default(),
        }
    }

    /// Wire a dashboard from config. `offline` swaps both lookups for ones
    /// that always fail, which exercises the degraded weather path. A live
    /// resolver that cannot be built degrades the same way.
    pub fn from_config(store: DatasetStore, config: &DashboardConfig, offline: bool) -> Self {
        let resolver = if offline {
            offline_resolver(config.lookup_timeout())
        } else {
            live_or_offline(
                EnrichmentResolver::http(
                    &config.location_url,
                    &config.weather_url,
                    config.lookup_timeout(),
                ),
                config.lookup_timeout(),
            )
        };
        let maps = MapSnapshotBuilder::to_file(&config.snapshot_path);
        Self::new(store, resolver, maps)
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn snapshot_target(&self) -> &SnapshotTarget {
        self.maps.target()
    }

    /// Outputs that `filter` invalidates relative to the current view.
    fn pending_outputs(&self, filter: &FilterState) -> Vec<Output> {
        match &self.state.filter {
            None => Output::ALL.to_vec(),
            Some(previous) => Output::affected_by(&filter.changed_fields(previous)),
        }
    }

    /// React to a filter event, recomputing every output that depends on a
    /// changed field. The first call recomputes everything.
    pub async fn react(&mut self, filter: FilterState) -> Reaction {
        let outputs = self.pending_outputs(&filter);
        if outputs.is_empty() {
            return Reaction {
                revision: self.state.revision,
                filter,
                recomputed: outputs,
            };
        }

        let revision = self.state.revision + 1;
        self.state.revision = revision;
        self.state.filter = Some(filter);
        if outputs.contains(&Output::AreaChart) || outputs.contains(&Output::PixelChart) {
            let rows = self.store.query(filter.region, filter.year);
            if outputs.contains(&Output::AreaChart) {
                let series = aggregate(&rows, Metric::EstimatedFireArea);
                let chart = area_chart(&series, &filter);
                DashboardState::place(
                    &mut self.state.area_chart,
                    Slot::new(revision, filter, chart),
                );
            }
            if outputs.contains(&Output::PixelChart) {
                let series = aggregate(&rows, Metric::PixelCount);
                let chart = pixel_chart(&series, &filter);
                DashboardState::place(
                    &mut self.state.pixel_chart,
                    Slot::new(revision, filter, chart),
                );
            }
        }

        let region = filter.region.code();
        let resolver = &self.resolver;
        let maps = &self.maps;
        let want_weather = outputs.contains(&Output::Weather);
        let want_map = outputs.contains(&Output::Map);
        let (weather, map) = tokio::join!(
            async move {
                if want_weather {
                    Some(resolver.resolve(region).await)
                } else {
                    None
                }
            },
            async move {
                if want_map {
                    Some(maps.build(region))
                } else {
                    None
                }
            }
        );

        if let Some(result) = weather {
            let panel = WeatherPanel::from(result);
            DashboardState::place(&mut self.state.weather, Slot::new(revision, filter, panel));
        }
        if let Some(built) = map {
            let slot = match built {
                Ok(snapshot) => MapSlot::Ready(snapshot),
                Err(e) => {
                    warn!("dashboard: map for {} failed: {}", region, e);
                    MapSlot::Failed {
                        message: e.to_string(),
                    }
                }
            };
            DashboardState::place(&mut self.state.map, Slot::new(revision, filter, slot));
        }

        info!(
            "dashboard: revision {} for {} {} recomputed {:?}",
            revision, filter.region, filter.year, outputs
        );
        Reaction {
            revision,
            filter,
            recomputed: outputs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awd_core::region::RegionCode;
    use awd_enrich::{LocationLookup, LookupError, WeatherLookup};
    use awd_map::{CoordinateTable, DEFAULT_COORDINATES};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    const SAMPLE: &str = "\
Region,Date,Estimated_fire_area,Count
NSW,1/4/2005,10,4
NSW,3/2/2005,6,2
NSW,3/9/2005,2,4
NSW,7/1/2006,1,1
QL,1/4/2005,50,20
";

    /// Counts calls and answers with canned weather for any city.
    struct CountingLookup(Arc<AtomicUsize>);

    #[async_trait]
    impl LocationLookup for CountingLookup {
        async fn locate(&self) -> Result<String, LookupError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(LookupError::Status(429))
        }
    }

    #[async_trait]
    impl WeatherLookup for CountingLookup {
        async fn weather(&self, city: &str) -> Result<String, LookupError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(format!("+21°C|Sunny|{}", city))
        }
    }

    fn offline_resolver() -> EnrichmentResolver {
        EnrichmentResolver::new(
            Box::new(UnavailableLookup),
            Box::new(UnavailableLookup),
            Duration::from_millis(50),
        )
    }

    fn dashboard_with(resolver: EnrichmentResolver, maps: MapSnapshotBuilder) -> Dashboard {
        Dashboard::new(DatasetStore::from_csv(SAMPLE).unwrap(), resolver, maps)
    }

    fn chart_values(slot: &Option<Slot<crate::chart::ChartSpec>>) -> (Vec<String>, Vec<f64>) {
        let chart = &slot.as_ref().unwrap().content;
        (chart.labels.clone(), chart.values.clone())
    }

    #[tokio::test]
    async fn startup_recomputes_everything() {
        let mut dash = dashboard_with(offline_resolver(), MapSnapshotBuilder::in_memory());
        let reaction = dash.react(FilterState::default()).await;
        assert_eq!(reaction.revision, 1);
        assert_eq!(reaction.recomputed, Output::ALL.to_vec());

        let state = dash.state();
        assert_eq!(
            chart_values(&state.area_chart),
            (vec!["January".to_string(), "March".to_string()], vec![10.0, 4.0])
        );
        assert_eq!(
            chart_values(&state.pixel_chart),
            (vec!["January".to_string(), "March".to_string()], vec![4.0, 3.0])
        );
        assert!(state.map.as_ref().unwrap().content.is_ready());
        assert_eq!(state.weather.as_ref().unwrap().content.location_label, "Sydney");
    }

    #[tokio::test]
    async fn scenario_single_january_observation() {
        let store = DatasetStore::from_csv(
            "Region,Date,Estimated_fire_area,Count\nNSW,1/15/2005,10,4\n",
        )
        .unwrap();
        let mut dash = Dashboard::new(store, offline_resolver(), MapSnapshotBuilder::in_memory());
        dash.react(FilterState::new(RegionCode::NewSouthWales, 2005)).await;
        let state = dash.state();
        assert_eq!(
            chart_values(&state.area_chart),
            (vec!["January".to_string()], vec![10.0])
        );
        assert_eq!(
            chart_values(&state.pixel_chart),
            (vec!["January".to_string()], vec![4.0])
        );
    }

    #[tokio::test]
    async fn year_change_skips_weather_and_map() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = EnrichmentResolver::new(
            Box::new(CountingLookup(calls.clone())),
            Box::new(CountingLookup(calls.clone())),
            Duration::from_millis(50),
        );
        let mut dash = dashboard_with(resolver, MapSnapshotBuilder::in_memory());
        dash.react(FilterState::default()).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let reaction = dash.react(FilterState::default().with_year(2006)).await;
        assert_eq!(reaction.recomputed, vec![Output::AreaChart, Output::PixelChart]);
        assert_eq!(calls.load(Ordering::SeqCst), 2, "no lookups on a year change");

        let state = dash.state();
        assert_eq!(state.area_chart.as_ref().unwrap().revision, 2);
        assert_eq!(state.weather.as_ref().unwrap().revision, 1);
        assert_eq!(state.map.as_ref().unwrap().revision, 1);
        assert_eq!(chart_values(&state.area_chart).0, vec!["July".to_string()]);
    }

    #[tokio::test]
    async fn region_change_recomputes_all_and_relocates() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = EnrichmentResolver::new(
            Box::new(CountingLookup(calls.clone())),
            Box::new(CountingLookup(calls.clone())),
            Duration::from_millis(50),
        );
        let mut dash = dashboard_with(resolver, MapSnapshotBuilder::in_memory());
        dash.react(FilterState::default()).await;
        let reaction = dash
            .react(FilterState::default().with_region(RegionCode::Queensland))
            .await;
        assert_eq!(reaction.recomputed, Output::ALL.to_vec());
        // ambient location is re-resolved on every region change
        assert_eq!(calls.load(Ordering::SeqCst), 4);

        let state = dash.state();
        let weather = &state.weather.as_ref().unwrap().content;
        assert_eq!(weather.temperature, "+21°C");
        assert_eq!(weather.location_label, "Brisbane");
        match &state.map.as_ref().unwrap().content {
            MapSlot::Ready(snap) => assert_eq!(snap.marker_label, "QL"),
            other => panic!("expected ready map, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unchanged_filter_is_a_no_op() {
        let mut dash = dashboard_with(offline_resolver(), MapSnapshotBuilder::in_memory());
        dash.react(FilterState::default()).await;
        let reaction = dash.react(FilterState::default()).await;
        assert!(reaction.recomputed.is_empty());
        assert_eq!(reaction.revision, 1);
        assert_eq!(dash.state().revision, 1);
    }

    #[tokio::test]
    async fn year_without_data_gives_empty_charts_with_titles() {
        let mut dash = dashboard_with(offline_resolver(), MapSnapshotBuilder::in_memory());
        dash.react(FilterState::new(RegionCode::Tasmania, 1990)).await;
        let state = dash.state();
        let area = &state.area_chart.as_ref().unwrap().content;
        let pixels = &state.pixel_chart.as_ref().unwrap().content;
        assert_eq!(area.category_count(), 0);
        assert_eq!(pixels.category_count(), 0);
        assert!(area.title.contains("TA") && area.title.contains("1990"));
        assert!(pixels.title.contains("TA") && pixels.title.contains("1990"));
    }

    #[tokio::test]
    async fn map_failure_only_affects_map_slot() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let maps = MapSnapshotBuilder::to_file(blocker.join("map.html"));
        let mut dash = dashboard_with(offline_resolver(), maps);

        dash.react(FilterState::default()).await;
        let state = dash.state();
        match &state.map.as_ref().unwrap().content {
            MapSlot::Failed { message } => assert!(message.contains("map snapshot")),
            other => panic!("expected failed map, got {:?}", other),
        }
        assert_eq!(state.area_chart.as_ref().unwrap().content.category_count(), 2);
        assert_eq!(state.weather.as_ref().unwrap().content.temperature, "N/A");
    }

    #[tokio::test]
    async fn region_missing_from_coordinates_uses_default() {
        let maps = MapSnapshotBuilder::new(
            CoordinateTable::default().without("QL"),
            SnapshotTarget::InMemory,
        );
        let mut dash = dashboard_with(offline_resolver(), maps);
        dash.react(FilterState::new(RegionCode::Queensland, 2005)).await;
        match &dash.state().map.as_ref().unwrap().content {
            MapSlot::Ready(snap) => {
                assert_eq!(snap.coordinates, DEFAULT_COORDINATES);
                assert_eq!(snap.marker_label, "QL");
            }
            other => panic!("expected ready map, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn resolver_build_failure_runs_offline() {
        let resolver = live_or_offline(
            Err(LookupError::Transport("no TLS backend".to_string())),
            Duration::from_millis(50),
        );
        let mut dash = dashboard_with(resolver, MapSnapshotBuilder::in_memory());
        dash.react(FilterState::new(RegionCode::Victoria, 2005)).await;
        let weather = &dash.state().weather.as_ref().unwrap().content;
        assert_eq!(weather.temperature, "N/A");
        assert_eq!(weather.location_label, "Melbourne");
    }

    #[tokio::test]
    async fn from_config_with_dead_endpoints_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let dead = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}", listener.local_addr().unwrap())
        };
        let config = DashboardConfig {
            location_url: format!("{}/json", dead),
            weather_url: dead,
            lookup_timeout_secs: 2,
            snapshot_path: dir.path().join("map.html"),
            ..Default::default()
        };
        let store = DatasetStore::from_csv(SAMPLE).unwrap();
        let mut dash = Dashboard::from_config(store, &config, false);
        dash.react(FilterState::default()).await;
        let state = dash.state();
        assert_eq!(state.area_chart.as_ref().unwrap().content.category_count(), 2);
        assert_eq!(state.weather.as_ref().unwrap().content.temperature, "N/A");
        assert!(state.map.as_ref().unwrap().content.is_ready());
    }

    #[tokio::test]
    async fn both_lookups_failing_degrades_weather() {
        let mut dash = dashboard_with(offline_resolver(), MapSnapshotBuilder::in_memory());
        dash.react(FilterState::new(RegionCode::NewSouthWales, 2005)).await;
        let weather = &dash.state().weather.as_ref().unwrap().content;
        assert_eq!(weather.temperature, "N/A");
        assert_eq!(weather.condition, "N/A");
        assert_eq!(weather.location_label, "Sydney");
    }
}
