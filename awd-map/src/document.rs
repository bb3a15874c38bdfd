//! Standalone Leaflet HTML for a one-marker map.

use crate::coords::Coordinates;

/// Zoom level every snapshot opens at.
pub const ZOOM_LEVEL: u8 = 10;

const LEAFLET_VERSION: &str = "1.9.4";

/// JSON-encode `s` for embedding in a `<script>` block.
fn js_string(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

/// Popup text for a region marker.
pub fn popup_text(marker_label: &str) -> String {
    format!("Region: {}", marker_label)
}

/// Render a full-page Leaflet map centred on `coords` with a single marker
/// whose popup names `marker_label`.
pub fn render_map_document(coords: Coordinates, marker_label: &str) -> String {
    let popup = js_string(&popup_text(marker_label));
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<link rel="stylesheet" href="https://unpkg.com/leaflet@{v}/dist/leaflet.css" />
<script src="https://unpkg.com/leaflet@{v}/dist/leaflet.js"></script>
<style>html, body {{ width: 100%; height: 100%; margin: 0; padding: 0; }} #map {{ position: absolute; top: 0; bottom: 0; right: 0; left: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map", {{ center: [{lat}, {lon}], zoom: {zoom} }});
L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
    maxZoom: 19,
    attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
L.marker([{lat}, {lon}]).addTo(map).bindPopup({popup});
</script>
</body>
</html>
"#,
        v = LEAFLET_VERSION,
        lat = coords.lat,
        lon = coords.lon,
        zoom = ZOOM_LEVEL,
        popup = popup,
    )
}
