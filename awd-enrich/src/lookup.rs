//! The two external lookups the resolver depends on.

use async_trait::async_trait;
use thiserror::Error;

/// Why a single external lookup failed. Never escapes the resolver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The service answered with a non-success status
    #[error("lookup returned status {0}")]
    Status(u16),

    /// The call did not finish within the resolver's bound
    #[error("lookup timed out")]
    Timeout,

    /// Connection or protocol failure
    #[error("lookup transport error: {0}")]
    Transport(String),

    /// The response did not have the expected shape
    #[error("malformed lookup response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LookupError::Timeout
        } else if let Some(status) = e.status() {
            LookupError::Status(status.as_u16())
        } else {
            LookupError::Transport(e.to_string())
        }
    }
}

/// Best-effort approximation of where the viewer is.
#[async_trait]
pub trait LocationLookup: Send + Sync {
    /// Name of the viewer's city.
    async fn locate(&self) -> Result<String, LookupError>;
}

/// Current weather for a named city, as a `temperature|condition|location` body.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn weather(&self, city: &str) -> Result<String, LookupError>;
}

/// A lookup that always fails. Used when running without network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableLookup;

#[async_trait]
impl LocationLookup for UnavailableLookup {
    async fn locate(&self) -> Result<String, LookupError> {
        Err(LookupError::Transport("offline".to_string()))
    }
}

#[async_trait]
impl WeatherLookup for UnavailableLookup {
    async fn weather(&self, _city: &str) -> Result<String, LookupError> {
        Err(LookupError::Transport("offline".to_string()))
    }
}
