//! Coordinates and locally computed geometry

pub mod distance;

use serde::{Deserialize, Serialize};

pub use distance::{haversine_distance, Distance};

/// A geographic coordinate (latitude, longitude) in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Parse a latitude/longitude pair from text
    ///
    /// Returns `None` if either value is not a finite number. No range check
    /// is applied.
    pub fn parse(lat: &str, lon: &str) -> Option<Self> {
        let lat = parse_degrees(lat)?;
        let lon = parse_degrees(lon)?;
        Some(Self::new(lat, lon))
    }
}

fn parse_degrees(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
