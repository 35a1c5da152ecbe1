//! IP-based geolocation
//!
//! Uses ipapi.co. The requested address is passed through verbatim; the
//! provider decides whether it is valid.

use crate::geo::{fetch_json, UpstreamError, UpstreamResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// IP lookup client
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: reqwest::Client,
    base_url: String,
}

/// ipapi.co response
///
/// Every field is optional; error responses arrive as 200 with
/// `{"error": true, "reason": ...}`.
#[derive(Debug, Default, Deserialize)]
struct IpApiResponse {
    ip: Option<String>,
    city: Option<String>,
    region: Option<String>,
    country_name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    timezone: Option<String>,
    org: Option<String>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

/// Normalized IP lookup result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpLookupResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
}

impl From<IpApiResponse> for IpLookupResult {
    fn from(data: IpApiResponse) -> Self {
        Self {
            ip: data.ip,
            city: data.city,
            region: data.region,
            country: data.country_name,
            latitude: data.latitude,
            longitude: data.longitude,
            timezone: data.timezone,
            isp: data.org,
        }
    }
}

impl IpLocator {
    /// Create an IP locator against the given provider base URL
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: super::base_url(base_url),
        }
    }

    /// Build `{base}/{ip}/json/`
    ///
    /// The address is appended as a single path segment, so IPv6 colons are
    /// kept and only characters that would break the segment are escaped.
    fn lookup_url(&self, ip: &str) -> UpstreamResult<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(ip)
            .push("json")
            .push("");

        Ok(url)
    }

    /// Look up geolocation data for an IP address
    pub async fn lookup(&self, ip: &str) -> UpstreamResult<IpLookupResult> {
        let url = self.lookup_url(ip)?;
        debug!("IP lookup: {}", url);

        let data: IpApiResponse = fetch_json(self.client.get(url)).await?;

        if data.error {
            return Err(UpstreamError::Rejected(
                data.reason.unwrap_or_else(|| "unknown reason".to_string()),
            ));
        }

        Ok(data.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_mapping() {
        let data: IpApiResponse = serde_json::from_str(
            r#"{
                "ip": "8.8.8.8",
                "city": "Mountain View",
                "region": "California",
                "country_name": "United States",
                "country": "US",
                "latitude": 37.42301,
                "longitude": -122.083352,
                "timezone": "America/Los_Angeles",
                "org": "GOOGLE"
            }"#,
        )
        .unwrap();

        let result = IpLookupResult::from(data);
        assert_eq!(result.country.as_deref(), Some("United States"));
        assert_eq!(result.isp.as_deref(), Some("GOOGLE"));
        assert_eq!(result.latitude, Some(37.42301));
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let data: IpApiResponse = serde_json::from_str(r#"{"ip": "10.0.0.1"}"#).unwrap();
        let json = serde_json::to_value(IpLookupResult::from(data)).unwrap();

        assert_eq!(json, serde_json::json!({"ip": "10.0.0.1"}));
    }

    #[test]
    fn test_key_order() {
        let result = IpLookupResult::from(IpApiResponse {
            ip: Some("1.1.1.1".to_string()),
            city: Some("c".to_string()),
            org: Some("o".to_string()),
            ..Default::default()
        });
        let text = serde_json::to_string(&result).unwrap();
        assert_eq!(text, r#"{"ip":"1.1.1.1","city":"c","isp":"o"}"#);
    }

    #[test]
    fn test_lookup_url_ipv4() {
        let locator = IpLocator::new(reqwest::Client::new(), "https://ipapi.co");
        let url = locator.lookup_url("8.8.8.8").unwrap();
        assert_eq!(url.as_str(), "https://ipapi.co/8.8.8.8/json/");
    }

    #[test]
    fn test_lookup_url_keeps_ipv6_colons() {
        let locator = IpLocator::new(reqwest::Client::new(), "https://ipapi.co/");
        let url = locator.lookup_url("2001:db8::1").unwrap();
        assert_eq!(url.path(), "/2001:db8::1/json/");
    }

    #[test]
    fn test_lookup_url_escapes_segment_breakers() {
        let locator = IpLocator::new(reqwest::Client::new(), "http://127.0.0.1:8080");
        let url = locator.lookup_url("a/b?c#d").unwrap();
        assert_eq!(url.path(), "/a%2Fb%3Fc%23d/json/");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_lookup_url_invalid_base() {
        let locator = IpLocator::new(reqwest::Client::new(), "not a url");
        assert!(matches!(
            locator.lookup_url("1.1.1.1"),
            Err(UpstreamError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_base_url_trimmed() {
        let locator = IpLocator::new(reqwest::Client::new(), "https://ipapi.co/");
        assert_eq!(locator.base_url, "https://ipapi.co");
    }
}
