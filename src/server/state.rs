//! Server shared state
//!
//! Built once at startup and shared read-only across requests.

use crate::config::Config;
use crate::error::Result;
use crate::geo::Providers;

/// Shared state for the HTTP server
#[derive(Debug)]
pub struct AppState {
    /// Configuration the server was started with
    pub config: Config,

    /// Upstream provider adapters
    pub providers: Providers,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Result<Self> {
        let providers = Providers::from_config(&config.providers)?;
        Ok(Self { config, providers })
    }
}
