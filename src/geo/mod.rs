//! Upstream provider adapters
//!
//! Each adapter issues a single outbound request and maps the provider's
//! loosely-typed JSON onto optional-field records. Failures are reported as
//! [`UpstreamError`] so callers can tell transport, status and parse problems
//! apart even though the HTTP API collapses them into one message.

pub mod ip_location;
pub mod nominatim;
pub mod timezone;

use crate::config::ProvidersConfig;
use crate::error::Result;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use ip_location::{IpLocator, IpLookupResult};
pub use nominatim::{NominatimClient, Place};
pub use timezone::{TimeInfo, TimezoneClient};

/// Failure talking to an upstream provider
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("provider returned status {0}")]
    HttpStatus(StatusCode),

    #[error("failed to parse provider response: {0}")]
    Parse(String),

    #[error("provider rejected request: {0}")]
    Rejected(String),

    #[error("invalid provider URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for upstream calls
pub type UpstreamResult<T> = std::result::Result<T, UpstreamError>;

/// Send a request and decode a 2xx JSON body
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> UpstreamResult<T> {
    let response = request.send().await.map_err(UpstreamError::Network)?;

    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::HttpStatus(status));
    }

    let body = response.bytes().await.map_err(UpstreamError::Network)?;
    serde_json::from_slice(&body).map_err(|e| UpstreamError::Parse(e.to_string()))
}

/// All upstream adapters, sharing one HTTP client
#[derive(Debug, Clone)]
pub struct Providers {
    pub ip: IpLocator,
    pub nominatim: NominatimClient,
    pub timezone: TimezoneClient,
}

impl Providers {
    /// Build the adapters from provider configuration
    pub fn from_config(config: &ProvidersConfig) -> Result<Self> {
        let client = config.http_client()?;

        Ok(Self {
            ip: IpLocator::new(client.clone(), &config.ip_api_url),
            nominatim: NominatimClient::new(client.clone(), &config.nominatim_url),
            timezone: TimezoneClient::new(client, &config.timezone_url, &config.timezone_zone),
        })
    }
}

/// Strip a trailing slash so paths can be appended with `format!`
fn base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
