//! Timezone lookup (World Time API)
//!
//! The zone queried is fixed by configuration and does not depend on the
//! coordinates the caller supplies.

use crate::geo::{fetch_json, UpstreamResult};
use serde::Deserialize;
use tracing::debug;

/// Timezone client
#[derive(Debug, Clone)]
pub struct TimezoneClient {
    client: reqwest::Client,
    base_url: String,
    zone: String,
}

/// World Time API response, reduced to the fields the gateway exposes
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeInfo {
    pub timezone: Option<String>,
    pub utc_offset: Option<String>,
    pub datetime: Option<String>,
}

impl TimezoneClient {
    /// Create a client querying `zone` under the given base URL
    pub fn new(client: reqwest::Client, base_url: &str, zone: &str) -> Self {
        Self {
            client,
            base_url: super::base_url(base_url),
            zone: zone.to_string(),
        }
    }

    /// Fetch the current time for the configured zone
    pub async fn current(&self) -> UpstreamResult<TimeInfo> {
        // Zone identifiers contain '/', so they are appended unencoded
        let url = format!("{}/{}", self.base_url, self.zone);
        debug!("Timezone lookup: {}", url);

        fetch_json(self.client.get(&url)).await
    }
}
