//! Great-circle distance
//!
//! Spherical haversine formula with a mean Earth radius of 6371 km.

use crate::constants::geo::{EARTH_RADIUS_KM, MILES_PER_KM};
use crate::coord::Coordinates;

/// A distance in both kilometers and miles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    pub km: f64,
    pub miles: f64,
}

impl Distance {
    fn from_km(km: f64) -> Self {
        Self {
            km,
            miles: km * MILES_PER_KM,
        }
    }
}

/// Calculate the great-circle distance between two points
///
/// Identical points yield exactly zero. Antipodal points are not
/// special-cased.
pub fn haversine_distance(from: Coordinates, to: Coordinates) -> Distance {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    Distance::from_km(EARTH_RADIUS_KM * c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identical_points() {
        let p = Coordinates::new(48.8566, 2.3522);
        let d = haversine_distance(p, p);
        assert_eq!(d.km, 0.0);
        assert_eq!(d.miles, 0.0);
    }

    #[test]
    fn test_symmetry() {
        let paris = Coordinates::new(48.8566, 2.3522);
        let tokyo = Coordinates::new(35.6762, 139.6503);

        let there = haversine_distance(paris, tokyo);
        let back = haversine_distance(tokyo, paris);
        assert_relative_eq!(there.km, back.km, epsilon = 1e-9);
        assert_relative_eq!(there.miles, back.miles, epsilon = 1e-9);
    }

    #[test]
    fn test_quarter_meridian() {
        let d = haversine_distance(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 90.0));
        assert_relative_eq!(d.km, 10007.543398, epsilon = 1e-3);
    }

    #[test]
    fn test_miles_conversion() {
        let d = haversine_distance(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 90.0));
        assert_relative_eq!(d.miles, d.km * 0.621371, epsilon = 1e-9);
    }

    #[test]
    fn test_known_city_pair() {
        // London to New York, roughly 5570 km
        let london = Coordinates::new(51.5074, -0.1278);
        let nyc = Coordinates::new(40.7128, -74.0060);
        let d = haversine_distance(london, nyc);
        assert!((d.km - 5570.0).abs() < 10.0, "got {}", d.km);
    }

    #[test]
    fn test_antipodal_points() {
        let d = haversine_distance(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 180.0));
        assert_relative_eq!(d.km, std::f64::consts::PI * 6371.0, epsilon = 1e-6);
    }
}
