//! geo-gateway: a small HTTP gateway for geolocation lookups
//!
//! Forwards IP lookup, forward/reverse geocoding and timezone queries to
//! public providers and reshapes their answers into a uniform JSON contract.
//! Great-circle distance is computed locally.
//!
//! ## Quick Start
//!
//! ```rust
//! use geo_gateway::coord::{haversine_distance, Coordinates};
//!
//! let london = Coordinates::new(51.5074, -0.1278);
//! let paris = Coordinates::new(48.8566, 2.3522);
//!
//! let d = haversine_distance(london, paris);
//! assert!((d.km - 343.5).abs() < 1.0);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod geo;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use coord::{Coordinates, Distance};
pub use error::{Error, Result};
