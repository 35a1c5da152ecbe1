//! Distance command handler
//!
//! Computes great-circle distance locally, without a server. Arguments are
//! parsed the same way as the `/distance` route, so `NaN` and `inf` are
//! rejected.

use crate::coord::{haversine_distance, Coordinates, Distance};
use crate::error::{Error, Result};
use clap::Args;

/// Distance command arguments
///
/// Use `--` before the coordinates if any of them are negative.
#[derive(Args)]
pub struct DistanceArgs {
    /// Origin latitude
    pub from_lat: String,
    /// Origin longitude
    pub from_lon: String,
    /// Destination latitude
    pub to_lat: String,
    /// Destination longitude
    pub to_lon: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the distance command
pub fn run(args: DistanceArgs) -> Result<()> {
    let (from, to, distance) = compute(&args)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "from": from,
                "to": to,
                "distance_km": distance.km,
                "distance_miles": distance.miles,
            }))?
        );
    } else {
        println!("{:.3} km ({:.3} miles)", distance.km, distance.miles);
    }

    Ok(())
}

fn compute(args: &DistanceArgs) -> Result<(Coordinates, Coordinates, Distance)> {
    let from = parse_point(&args.from_lat, &args.from_lon)?;
    let to = parse_point(&args.to_lat, &args.to_lon)?;
    Ok((from, to, haversine_distance(from, to)))
}

fn parse_point(lat: &str, lon: &str) -> Result<Coordinates> {
    Coordinates::parse(lat, lon).ok_or_else(|| {
        Error::InvalidCoordinates(format!("({}, {}) must be finite numbers", lat, lon))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: [&str; 4]) -> DistanceArgs {
        DistanceArgs {
            from_lat: values[0].to_string(),
            from_lon: values[1].to_string(),
            to_lat: values[2].to_string(),
            to_lon: values[3].to_string(),
            json: false,
        }
    }

    #[test]
    fn test_compute_quarter_meridian() {
        let (from, to, distance) = compute(&args(["0", "0", "0", "90"])).unwrap();
        assert_eq!(from, Coordinates::new(0.0, 0.0));
        assert_eq!(to, Coordinates::new(0.0, 90.0));
        assert!((distance.km - 10007.543).abs() < 0.01);
    }

    #[test]
    fn test_run_accepts_negative_coordinates() {
        assert!(run(args(["51.5074", "-0.1278", "40.7128", "-74.0060"])).is_ok());
    }

    #[test]
    fn test_run_rejects_nan() {
        let result = run(args(["NaN", "0", "0", "0"]));
        assert!(matches!(result, Err(Error::InvalidCoordinates(_))));
    }

    #[test]
    fn test_run_rejects_infinity_and_text() {
        assert!(run(args(["0", "0", "inf", "0"])).is_err());
        assert!(run(args(["0", "east", "0", "0"])).is_err());
    }

    #[test]
    fn test_json_output() {
        let mut a = args(["1", "2", "3", "4"]);
        a.json = true;
        assert!(run(a).is_ok());
    }
}
