use crate::http::{build_client, IpInfoLocation, WttrWeather};
use crate::lookup::{LocationLookup, LookupError, WeatherLookup};
use crate::result::EnrichmentResult;
use log::{info, warn};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

/// Weather target when neither the viewer nor the region resolves a city.
pub const DEFAULT_CITY: &str = "Sydney";

/// Capital city for a dataset region code. Unrecognized codes map to
/// [`DEFAULT_CITY`].
pub fn region_to_city(region: &str) -> &'static str {
    match region {
        "NSW" => "Sydney",
        "NT" => "Darwin",
        "QL" => "Brisbane",
        "SA" => "Adelaide",
        "TA" => "Hobart",
        "VI" => "Melbourne",
        "WA" => "Perth",
        other => {
            warn!("enrich: no city for region '{}', using {}", other, DEFAULT_CITY);
            DEFAULT_CITY
        }
    }
}

/// Where the weather target came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CitySource {
    /// The ambient geolocation lookup.
    Viewer,
    /// The static region table.
    RegionTable,
}

/// Outcome of the first resolution stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCity {
    pub city: String,
    pub source: CitySource,
}

/// Two-stage weather resolver. See the crate docs for the fallback chain.
pub struct EnrichmentResolver {
    location: Box<dyn LocationLookup>,
    weather: Box<dyn WeatherLookup>,
    timeout: Duration,
}

impl EnrichmentResolver {
    pub fn new(
        location: Box<dyn LocationLookup>,
        weather: Box<dyn WeatherLookup>,
        timeout: Duration,
    ) -> Self {
        Self {
            location,
            weather,
            timeout,
        }
    }

    /// Resolver backed by the ipinfo/wttr HTTP services.
    pub fn http(
        location_url: &str,
        weather_url: &str,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        let client = build_client(timeout)?;
        Ok(Self::new(
            Box::new(IpInfoLocation::new(client.clone(), location_url)),
            Box::new(WttrWeather::new(client, weather_url)),
            timeout,
        ))
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, LookupError>
    where
        F: Future<Output = Result<T, LookupError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::Timeout),
        }
    }

    /// Stage one: the viewer's city, else the region's capital.
    pub async fn resolve_city(&self, region: &str) -> ResolvedCity {
        match self.bounded(self.location.locate()).await {
            Ok(city) => ResolvedCity {
                city,
                source: CitySource::Viewer,
            },
            Err(e) => {
                let city = region_to_city(region);
                warn!(
                    "enrich: viewer location unavailable ({}), using {} for {}",
                    e, city, region
                );
                ResolvedCity {
                    city: city.to_string(),
                    source: CitySource::RegionTable,
                }
            }
        }
    }

    /// Stage two: current weather for `city`, or the degraded result.
    pub async fn fetch_weather(&self, city: &str) -> EnrichmentResult {
        let outcome = match self.bounded(self.weather.weather(city)).await {
            Ok(body) => EnrichmentResult::from_weather_body(&body),
            Err(e) => Err(e),
        };
        outcome.unwrap_or_else(|e| {
            warn!("enrich: weather for {} unavailable: {}", city, e);
            EnrichmentResult::unavailable(city)
        })
    }

    /// Resolve the weather panel for `region`. Never fails.
    pub async fn resolve(&self, region: &str) -> EnrichmentResult {
        let resolved = self.resolve_city(region).await;
        let result = self.fetch_weather(&resolved.city).await;
        info!(
            "enrich: {} -> {} ({:?}): {} {}",
            region, resolved.city, resolved.source, result.temperature, result.condition
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::UnavailableLookup;
    use crate::result::NOT_AVAILABLE;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct FixedLocation(Result<String, LookupError>, Arc<AtomicUsize>);

    #[async_trait]
    impl LocationLookup for FixedLocation {
        async fn locate(&self) -> Result<String, LookupError> {
            self.1.fetch_add(1, Ordering::SeqCst);
            self.0.clone()
        }
    }

    /// Answers with a canned body and records each city it was asked for.
    struct RecordingWeather {
        body: Result<String, LookupError>,
        cities: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl WeatherLookup for RecordingWeather {
        async fn weather(&self, city: &str) -> Result<String, LookupError> {
            self.cities.lock().unwrap().push(city.to_string());
            self.body.clone()
        }
    }

    struct StalledLookup;

    #[async_trait]
    impl LocationLookup for StalledLookup {
        async fn locate(&self) -> Result<String, LookupError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("Nowhere".to_string())
        }
    }

    #[async_trait]
    impl WeatherLookup for StalledLookup {
        async fn weather(&self, _city: &str) -> Result<String, LookupError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("+1°C|Still|Nowhere".to_string())
        }
    }

    fn recording(body: Result<&str, LookupError>) -> (RecordingWeather, Arc<Mutex<Vec<String>>>) {
        let cities = Arc::new(Mutex::new(Vec::new()));
        (
            RecordingWeather {
                body: body.map(str::to_string),
                cities: cities.clone(),
            },
            cities,
        )
    }

    const TIMEOUT: Duration = Duration::from_millis(50);

    #[tokio::test]
    async fn viewer_city_is_weather_target() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (weather, cities) = recording(Ok("+25°C|Sunny|Canberra"));
        let resolver = EnrichmentResolver::new(
            Box::new(FixedLocation(Ok("Canberra".to_string()), calls.clone())),
            Box::new(weather),
            TIMEOUT,
        );
        let result = resolver.resolve("NSW").await;
        assert_eq!(result.temperature, "+25°C");
        assert_eq!(result.condition, "Sunny");
        assert_eq!(result.location_label, "Canberra");
        assert_eq!(*cities.lock().unwrap(), vec!["Canberra".to_string()]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn location_failure_falls_back_to_region_table() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (weather, cities) = recording(Ok("+30°C|Clear|Darwin"));
        let resolver = EnrichmentResolver::new(
            Box::new(FixedLocation(Err(LookupError::Status(503)), calls)),
            Box::new(weather),
            TIMEOUT,
        );
        let resolved = resolver.resolve_city("NT").await;
        assert_eq!(resolved.city, "Darwin");
        assert_eq!(resolved.source, CitySource::RegionTable);

        let result = resolver.resolve("NT").await;
        assert_eq!(result.temperature, "+30°C");
        assert!(!result.condition.is_empty());
        assert_eq!(result.location_label, "Darwin");
        assert_eq!(cities.lock().unwrap().last().unwrap(), "Darwin");
    }

    #[tokio::test]
    async fn weather_failure_returns_sentinels_with_attempted_city() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (weather, cities) = recording(Err(LookupError::Status(500)));
        let resolver = EnrichmentResolver::new(
            Box::new(FixedLocation(Ok("Ballarat".to_string()), calls)),
            Box::new(weather),
            TIMEOUT,
        );
        let result = resolver.resolve("VI").await;
        assert_eq!(result, EnrichmentResult::unavailable("Ballarat"));
        // attempted at most once, no retries
        assert_eq!(cities.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn malformed_weather_body_degrades() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (weather, _) = recording(Ok("Unknown location"));
        let resolver = EnrichmentResolver::new(
            Box::new(FixedLocation(Err(LookupError::Timeout), calls)),
            Box::new(weather),
            TIMEOUT,
        );
        let result = resolver.resolve("WA").await;
        assert_eq!(result.temperature, NOT_AVAILABLE);
        assert_eq!(result.location_label, "Perth");
    }

    #[tokio::test]
    async fn both_lookups_failing_gives_region_city_sentinels() {
        let resolver = EnrichmentResolver::new(
            Box::new(UnavailableLookup),
            Box::new(UnavailableLookup),
            TIMEOUT,
        );
        let result = resolver.resolve("NSW").await;
        assert_eq!(
            result,
            EnrichmentResult {
                temperature: "N/A".to_string(),
                condition: "N/A".to_string(),
                location_label: region_to_city("NSW").to_string(),
            }
        );
    }

    #[tokio::test]
    async fn unknown_region_uses_default_city() {
        let resolver = EnrichmentResolver::new(
            Box::new(UnavailableLookup),
            Box::new(UnavailableLookup),
            TIMEOUT,
        );
        let result = resolver.resolve("ACT").await;
        assert_eq!(result.location_label, DEFAULT_CITY);
    }

    #[tokio::test]
    async fn stalled_services_are_bounded() {
        let resolver =
            EnrichmentResolver::new(Box::new(StalledLookup), Box::new(StalledLookup), TIMEOUT);
        let started = std::time::Instant::now();
        let result = resolver.resolve("TA").await;
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(result, EnrichmentResult::unavailable("Hobart"));
    }

    #[test]
    fn region_table_covers_all_codes() {
        let expected = [
            ("NSW", "Sydney"),
            ("NT", "Darwin"),
            ("QL", "Brisbane"),
            ("SA", "Adelaide"),
            ("TA", "Hobart"),
            ("VI", "Melbourne"),
            ("WA", "Perth"),
        ];
        for (code, city) in expected {
            assert_eq!(region_to_city(code), city);
        }
    }
}
