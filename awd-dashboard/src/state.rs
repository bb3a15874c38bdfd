//! Display slots and the view state the controller fills.
//!
//! [`Output::depends_on`] is the dependency table: which filter fields each
//! output is a function of. The controller recomputes an output only when
//! one of its fields changed.

use crate::chart::ChartSpec;
use awd_core::filter::{FilterField, FilterState};
use awd_enrich::EnrichmentResult;
use awd_map::GeoSnapshot;
use serde::Serialize;

/// The dashboard's four display slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Output {
    AreaChart,
    PixelChart,
    Weather,
    Map,
}

impl Output {
    pub const ALL: [Output; 4] = [
        Output::AreaChart,
        Output::PixelChart,
        Output::Weather,
        Output::Map,
    ];

    /// Filter fields this output is derived from.
    pub fn depends_on(&self) -> &'static [FilterField] {
        match self {
            Output::AreaChart | Output::PixelChart => &[FilterField::Region, FilterField::Year],
            Output::Weather | Output::Map => &[FilterField::Region],
        }
    }

    /// Outputs affected by a change to any of `changed`, in slot order.
    pub fn affected_by(changed: &[FilterField]) -> Vec<Output> {
        Output::ALL
            .into_iter()
            .filter(|o| o.depends_on().iter().any(|f| changed.contains(f)))
            .collect()
    }
}

/// What the weather panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherPanel {
    pub temperature: String,
    pub condition: String,
    pub location_label: String,
}

impl From<EnrichmentResult> for WeatherPanel {
    fn from(r: EnrichmentResult) -> Self {
        WeatherPanel {
            temperature: r.temperature,
            condition: r.condition,
            location_label: r.location_label,
        }
    }
}

/// The map slot: a snapshot, or a visible error confined to this slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MapSlot {
    Ready(GeoSnapshot),
    Failed { message: String },
}

impl MapSlot {
    pub fn is_ready(&self) -> bool {
        matches!(self, MapSlot::Ready(_))
    }
}

/// Slot content stamped with the reaction revision that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot<T> {
    pub revision: u64,
    /// The filter the content was computed for.
    pub filter: FilterState,
    pub content: T,
}

impl<T> Slot<T> {
    pub fn new(revision: u64, filter: FilterState, content: T) -> Self {
        Slot {
            revision,
            filter,
            content,
        }
    }
}

/// Everything currently on screen.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardState {
    /// Filter of the latest completed reaction. `None` before startup.
    pub filter: Option<FilterState>,
    pub revision: u64,
    pub area_chart: Option<Slot<ChartSpec>>,
    pub pixel_chart: Option<Slot<ChartSpec>>,
    pub weather: Option<Slot<WeatherPanel>>,
    pub map: Option<Slot<MapSlot>>,
}

impl DashboardState {
    /// Store `content` in `slot` unless it comes from a reaction older than
    /// what the slot already shows.
    pub fn place<T>(slot: &mut Option<Slot<T>>, incoming: Slot<T>) -> bool {
        match slot {
            Some(current) if current.revision > incoming.revision => {
                log::debug!(
                    "state: dropping stale revision {} (showing {})",
                    incoming.revision,
                    current.revision
                );
                false
            }
            _ => {
                *slot = Some(incoming);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_table() {
        assert_eq!(
            Output::affected_by(&[FilterField::Year]),
            vec![Output::AreaChart, Output::PixelChart]
        );
        assert_eq!(Output::affected_by(&[FilterField::Region]), Output::ALL.to_vec());
        assert!(Output::affected_by(&[]).is_empty());
    }

    #[test]
    fn place_discards_stale_revisions() {
        let filter = FilterState::default();
        let mut slot: Option<Slot<u32>> = None;
        assert!(DashboardState::place(
            &mut slot,
            Slot { revision: 2, filter, content: 2 }
        ));
        assert!(!DashboardState::place(
            &mut slot,
            Slot { revision: 1, filter, content: 1 }
        ));
        assert_eq!(slot.as_ref().unwrap().content, 2);
        assert!(DashboardState::place(
            &mut slot,
            Slot { revision: 3, filter, content: 3 }
        ));
        assert_eq!(slot.unwrap().content, 3);
    }

    #[test]
    fn weather_panel_from_result() {
        let panel: WeatherPanel = EnrichmentResult::unavailable("Perth").into();
        assert_eq!(panel.temperature, "N/A");
        assert_eq!(panel.location_label, "Perth");
    }
}
