//! HTTP implementations of the lookups: ipinfo.io for the viewer's city and
//! wttr.in for current weather. Neither needs an API key.

use crate::lookup::{LocationLookup, LookupError, WeatherLookup};
use crate::result::UNKNOWN_LOCATION;
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;

/// Default geolocation endpoint.
pub const IPINFO_URL: &str = "https://ipinfo.io/json";

/// Default weather endpoint; the city is appended as a path segment.
pub const WTTR_URL: &str = "https://wttr.in";

/// wttr.in one-line format: temperature, condition text, location.
pub const WTTR_FORMAT: &str = "format=%t|%C|%l";

/// Build the client shared by both lookups, with a per-request timeout.
pub fn build_client(timeout: Duration) -> Result<Client, LookupError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(LookupError::from)
}

#[derive(Debug, Deserialize)]
struct IpInfo {
    city: Option<String>,
}

/// Geolocation via an ipinfo-style JSON endpoint with a `city` field.
pub struct IpInfoLocation {
    client: Client,
    url: String,
}

impl IpInfoLocation {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl LocationLookup for IpInfoLocation {
    async fn locate(&self) -> Result<String, LookupError> {
        debug!("enrich: locating viewer via {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }
        let info: IpInfo = response
            .json()
            .await
            .map_err(|e| LookupError::Malformed(e.to_string()))?;
        match info.city.map(|c| c.trim().to_string()) {
            Some(city) if !city.is_empty() && city != UNKNOWN_LOCATION => Ok(city),
            _ => Err(LookupError::Malformed("response has no city".to_string())),
        }
    }
}

/// Weather via a wttr.in-style endpoint returning `%t|%C|%l`.
pub struct WttrWeather {
    client: Client,
    base_url: String,
}

impl WttrWeather {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// `{base}/{city}?format=%t|%C|%l`, with the city percent-encoded.
    pub fn url_for(&self, city: &str) -> Result<Url, LookupError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| LookupError::Malformed(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::Malformed(format!("{} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .push(city);
        url.set_query(Some(WTTR_FORMAT));
        Ok(url)
    }
}

#[async_trait]
impl WeatherLookup for WttrWeather {
    async fn weather(&self, city: &str) -> Result<String, LookupError> {
        let url = self.url_for(city)?;
        debug!("enrich: fetching weather from {}", url);
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }
        Ok(response.text().await?)
    }
}
