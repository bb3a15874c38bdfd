use crate::lookup::LookupError;
use serde::{Deserialize, Serialize};

/// Sentinel for a weather field that could not be fetched.
pub const NOT_AVAILABLE: &str = "N/A";

/// Sentinel the geolocation stage uses for "no city".
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Current weather for the dashboard's weather panel.
///
/// Either every field comes from one successful weather response, or
/// `temperature` and `condition` are [`NOT_AVAILABLE`] and
/// `location_label` names the city that was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub temperature: String,
    pub condition: String,
    pub location_label: String,
}

impl EnrichmentResult {
    /// The degraded result for a failed lookup of `city`.
    pub fn unavailable(city: &str) -> Self {
        EnrichmentResult {
            temperature: NOT_AVAILABLE.to_string(),
            condition: NOT_AVAILABLE.to_string(),
            location_label: city.to_string(),
        }
    }

    /// True when this result carries live data.
    pub fn is_available(&self) -> bool {
        self.temperature != NOT_AVAILABLE
    }

    /// Parse a `temperature|condition|location` weather body.
    ///
    /// Extra fields are ignored. Fewer than three fields, or an empty
    /// temperature, is malformed.
    pub fn from_weather_body(body: &str) -> Result<Self, LookupError> {
        let fields: Vec<&str> = body.trim().split('|').map(str::trim).collect();
        match fields.as_slice() {
            [temperature, condition, location, ..] if !temperature.is_empty() => {
                Ok(EnrichmentResult {
                    temperature: temperature.to_string(),
                    condition: condition.to_string(),
                    location_label: location.to_string(),
                })
            }
            _ => Err(LookupError::Malformed(format!(
                "expected 'temperature|condition|location', got '{}'",
                body.trim()
            ))),
        }
    }
}
