//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Forward search is capped at one candidate. Nominatim requires a
//! User-Agent, which the shared client always sends.

use crate::geo::{fetch_json, UpstreamResult};
use serde::Deserialize;
use tracing::debug;

/// Nominatim client for forward and reverse geocoding
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

/// A forward geocoding candidate
///
/// Nominatim encodes coordinates as strings; they are kept that way.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Place {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub display_name: Option<String>,
}

/// Reverse geocoding response
///
/// When nothing is found Nominatim answers 200 with `{"error": ...}` and no
/// `display_name`.
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

impl NominatimClient {
    /// Create a client against the given Nominatim base URL
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: super::base_url(base_url),
        }
    }

    /// Geocode free text, returning the first candidate if any
    pub async fn search(&self, query: &str) -> UpstreamResult<Option<Place>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );
        debug!("Nominatim search: {}", url);

        let results: Vec<Place> = fetch_json(self.client.get(&url)).await?;
        Ok(results.into_iter().next())
    }

    /// Reverse geocode a coordinate pair to a display name
    ///
    /// The coordinates are forwarded exactly as given.
    pub async fn reverse(&self, lat: &str, lon: &str) -> UpstreamResult<Option<String>> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json",
            self.base_url,
            urlencoding::encode(lat),
            urlencoding::encode(lon)
        );
        debug!("Nominatim reverse: {}", url);

        let result: ReverseResponse = fetch_json(self.client.get(&url)).await?;
        Ok(result.display_name)
    }
}
