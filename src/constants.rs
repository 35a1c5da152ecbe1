//! Centralized constants for the geo-gateway crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers
    pub const EARTH_RADIUS_KM: f64 = 6371.0;

    /// Miles per kilometer
    pub const MILES_PER_KM: f64 = 0.621371;
}

/// External API endpoints
pub mod api {
    /// IP geolocation API (ipapi.co, free tier, no key required)
    pub const IP_API_URL: &str = "https://ipapi.co";

    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// World Time API timezone endpoint
    pub const TIMEZONE_URL: &str = "https://worldtimeapi.org/api/timezone";
}

/// Fixed messages returned to API callers
pub mod messages {
    pub const IP_LOOKUP_FAILED: &str = "Failed to fetch IP data";
    pub const REVERSE_GEOCODE_FAILED: &str = "Failed to fetch address";
    pub const GEOCODE_FAILED: &str = "Failed to fetch coordinates";
    pub const TIMEZONE_FAILED: &str = "Failed to fetch timezone";
    pub const ADDRESS_NOT_FOUND: &str = "Address not found";
    pub const ROUTE_NOT_FOUND: &str = "Route not found";
    pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
    pub const INTERNAL_ERROR: &str = "Internal Server Error";
}
