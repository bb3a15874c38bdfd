//! Static HTML export of the current dashboard view.

use crate::chart::ChartSpec;
use crate::options::FilterOptions;
use crate::state::{DashboardState, MapSlot, Slot, WeatherPanel};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

pub const PAGE_TITLE: &str = "Australia Wildfire Dashboard";
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

pub const AREA_HEADING: &str = "Monthly Average Estimated Fire Area";
pub const WEATHER_HEADING: &str = "Live Weather";
pub const PIXEL_HEADING: &str = "Average Count of Pixels for Presumed Vegetation Fires";

/// Dashboard theme.
pub mod theme {
    pub const PRIMARY: &str = "#3A59D1";
    pub const SECONDARY: &str = "#3D90D7";
    pub const ACCENT: &str = "#7AC6D2";
    pub const LIGHT: &str = "#B5FCCD";
    pub const WHITE: &str = "#FFFFFF";
}

const MAP_PENDING: &str = "Map not rendered yet.";

fn stylesheet() -> String {
    format!(
        r#"body {{ margin: 0; font-family: sans-serif; background: {white}; }}
nav {{ background: {primary}; color: {white}; padding: 12px 20px; font-size: 1.4em; }}
.layout {{ display: flex; }}
aside {{ width: 220px; padding: 16px; background: {light}; }}
main {{ flex: 1; display: grid; grid-template-columns: 1fr 1fr; gap: 16px; padding: 16px; }}
.card {{ border: 1px solid {accent}; border-radius: 6px; }}
.card h2 {{ margin: 0; padding: 8px 12px; font-size: 1em; background: {secondary}; color: {white}; }}
.card .body {{ padding: 8px 12px; min-height: 320px; }}
.map-error {{ color: #B00020; }}
iframe {{ width: 100%; height: 400px; border: 0; }}"#,
        primary = theme::PRIMARY,
        secondary = theme::SECONDARY,
        accent = theme::ACCENT,
        light = theme::LIGHT,
        white = theme::WHITE,
    )
}

fn sidebar(out: &mut String, state: &DashboardState, options: &FilterOptions) {
    let active = state.filter;
    out.push_str("<aside>\n<h3>Select Region</h3>\n");
    for option in &options.regions {
        let checked = active.map(|f| f.region == option.value).unwrap_or(false);
        let _ = writeln!(
            out,
            r#"<label><input type="radio" name="region" value="{}" disabled{}> {}</label><br>"#,
            option.value.code(),
            if checked { " checked" } else { "" },
            encode_text(option.label),
        );
    }
    out.push_str("<h3>Select Year</h3>\n<select name=\"year\" disabled>\n");
    for year in &options.years {
        let selected = active.map(|f| f.year == *year).unwrap_or(false);
        let _ = writeln!(
            out,
            r#"<option value="{year}"{}>{year}</option>"#,
            if selected { " selected" } else { "" },
        );
    }
    out.push_str("</select>\n");
    if let Some(f) = active {
        let _ = writeln!(
            out,
            "<p class=\"active\">Showing {} in {}</p>",
            encode_text(f.region.display_name()),
            f.year
        );
    }
    out.push_str("</aside>\n");
}

/// JSON for an inline `<script>`; `</` is split so it cannot close the tag.
fn script_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

fn chart_card(out: &mut String, id: &str, heading: &str, chart: &Option<Slot<ChartSpec>>) {
    let _ = writeln!(
        out,
        "<section class=\"card\"><h2>{}</h2><div class=\"body\" id=\"{}\"></div></section>",
        encode_text(heading),
        id
    );
    if let Some(slot) = chart {
        let figure = slot.content.to_plotly();
        let _ = writeln!(
            out,
            "<script>(function () {{ var fig = {}; Plotly.newPlot(\"{}\", fig.data, fig.layout); }})();</script>",
            script_json(&figure),
            id
        );
    }
}

fn weather_card(out: &mut String, weather: &Option<Slot<WeatherPanel>>) {
    let _ = writeln!(
        out,
        "<section class=\"card\"><h2>{}</h2><div class=\"body\">",
        WEATHER_HEADING
    );
    match weather {
        Some(slot) => {
            let w = &slot.content;
            let _ = writeln!(
                out,
                "<p class=\"location\">{}</p>\n<p class=\"temperature\">{}</p>\n<p class=\"condition\">{}</p>",
                encode_text(&w.location_label),
                encode_text(&w.temperature),
                encode_text(&w.condition),
            );
        }
        None => out.push_str("<p>Weather not loaded yet.</p>\n"),
    }
    out.push_str("</div></section>\n");
}

fn map_card(out: &mut String, map: &Option<Slot<MapSlot>>) {
    out.push_str("<section class=\"card\"><h2>Fire Location</h2><div class=\"body\">\n");
    match map.as_ref().map(|slot| &slot.content) {
        Some(MapSlot::Ready(snapshot)) => {
            let _ = writeln!(
                out,
                "<iframe title=\"map\" srcdoc=\"{}\"></iframe>",
                encode_double_quoted_attribute(&snapshot.document)
            );
        }
        Some(MapSlot::Failed { message }) => {
            let _ = writeln!(out, "<p class=\"map-error\">{}</p>", encode_text(message));
        }
        None => {
            let _ = writeln!(out, "<p>{}</p>", MAP_PENDING);
        }
    }
    out.push_str("</div></section>\n");
}

/// Render `state` as one standalone HTML document.
pub fn render_page(state: &DashboardState, options: &FilterOptions) -> String {
    let mut out = String::with_capacity(16 * 1024);
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <script src=\"{cdn}\"></script>\n<style>\n{css}\n</style>\n</head>\n<body>\n\
         <nav>{title}</nav>\n<div class=\"layout\">\n",
        title = PAGE_TITLE,
        cdn = PLOTLY_CDN,
        css = stylesheet(),
    );
    sidebar(&mut out, state, options);
    out.push_str("<main>\n");
    chart_card(&mut out, "area-chart", AREA_HEADING, &state.area_chart);
    weather_card(&mut out, &state.weather);
    chart_card(&mut out, "pixel-chart", PIXEL_HEADING, &state.pixel_chart);
    map_card(&mut out, &state.map);
    out.push_str("</main>\n</div>\n</body>\n</html>\n");
    out
}
