//! Live weather enrichment for the wildfire dashboard.
//!
//! Resolution runs in two stages, each a separate function on
//! [`EnrichmentResolver`]:
//!
//! 1. [`resolve_city`](EnrichmentResolver::resolve_city): ask the ambient
//!    geolocation lookup where the viewer is; if that fails in any way, map
//!    the selected region to its capital through [`region_to_city`].
//! 2. [`fetch_weather`](EnrichmentResolver::fetch_weather): query the weather
//!    service for that city; if that fails, return
//!    [`EnrichmentResult::unavailable`] labelled with the city that was tried.
//!
//! Every network call is attempted once and bounded by the resolver's
//! timeout. Nothing in this crate returns an error to its caller:
//! [`EnrichmentResolver::resolve`] always yields a fully populated result.

pub mod http;
pub mod lookup;
pub mod resolver;
pub mod result;

pub use lookup::{LocationLookup, LookupError, UnavailableLookup, WeatherLookup};
pub use resolver::{region_to_city, CitySource, EnrichmentResolver, ResolvedCity, DEFAULT_CITY};
pub use result::{EnrichmentResult, NOT_AVAILABLE, UNKNOWN_LOCATION};
