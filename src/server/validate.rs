//! Query parameter validation
//!
//! Presence is checked before any upstream call. Values are not coerced or
//! range checked here.

use crate::coord::Coordinates;
use crate::server::response::ApiError;

/// Return the value if present and non-empty
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Require every value to be present, failing with one message for the group
pub fn require_all<'a, const N: usize>(
    values: [&'a Option<String>; N],
    message: &'static str,
) -> Result<[&'a str; N], ApiError> {
    let mut out: [&'a str; N] = [""; N];
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = present(value).ok_or(ApiError::MissingParameter(message))?;
    }
    Ok(out)
}

/// Parse a textual coordinate pair, failing with `message` if not numeric
pub fn numeric_pair(lat: &str, lon: &str, message: &str) -> Result<Coordinates, ApiError> {
    Coordinates::parse(lat, lon).ok_or_else(|| ApiError::InvalidParameter(message.to_string()))
}
