//! Chart specs handed to the charting boundary.
//!
//! A [`ChartSpec`] carries everything the figure needs (kind, title,
//! categories and values) and serializes to a Plotly figure with
//! [`ChartSpec::to_plotly`]. Rendering itself happens on the other side.

use awd_core::filter::FilterState;
use awd_data::aggregation::AggregateSeries;
use serde::Serialize;
use serde_json::{json, Value};

/// Color used for chart titles.
pub const TITLE_COLOR: &str = "gray";

/// Figure type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Share of the total per category.
    Pie,
    /// One bar per category.
    Bar,
}

/// A chart ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    /// Month names, calendar order.
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
}

/// Title of the estimated fire area pie chart.
pub fn area_chart_title(filter: &FilterState) -> String {
    format!(
        "{} : Monthly Average Estimated Fire Area in {}",
        filter.region, filter.year
    )
}

/// Title of the pixel count bar chart.
pub fn pixel_chart_title(filter: &FilterState) -> String {
    format!(
        "{} : Avg. Count of Pixels for Presumed Vegetation Fires in {}",
        filter.region, filter.year
    )
}

fn labels_of(series: &AggregateSeries) -> Vec<String> {
    series.labels().into_iter().map(str::to_string).collect()
}

/// Pie chart of monthly mean estimated fire area.
pub fn area_chart(series: &AggregateSeries, filter: &FilterState) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Pie,
        title: area_chart_title(filter),
        labels: labels_of(series),
        values: series.values(),
        x_label: None,
        y_label: None,
    }
}

/// Bar chart of monthly mean pixel count.
pub fn pixel_chart(series: &AggregateSeries, filter: &FilterState) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: pixel_chart_title(filter),
        labels: labels_of(series),
        values: series.values(),
        x_label: Some("Month".to_string()),
        y_label: Some("Count".to_string()),
    }
}

impl ChartSpec {
    /// Number of categories (months) in the chart.
    pub fn category_count(&self) -> usize {
        self.labels.len()
    }

    /// Plotly figure JSON (`data` + `layout`).
    pub fn to_plotly(&self) -> Value {
        let trace = match self.kind {
            ChartKind::Pie => json!({
                "type": "pie",
                "labels": self.labels,
                "values": self.values,
            }),
            ChartKind::Bar => json!({
                "type": "bar",
                "x": self.labels,
                "y": self.values,
            }),
        };
        let mut layout = json!({
            "title": { "text": self.title, "font": { "color": TITLE_COLOR } },
        });
        if let Some(x) = &self.x_label {
            layout["xaxis"] = json!({ "title": { "text": x } });
        }
        if let Some(y) = &self.y_label {
            layout["yaxis"] = json!({ "title": { "text": y } });
        }
        json!({ "data": [trace], "layout": layout })
    }
}
