//! HTTP server for geo-gateway
//!
//! Provides the REST API that fronts the upstream geolocation providers.

pub mod response;
pub mod routes;
pub mod state;
pub mod validate;

use crate::config::Config;
use crate::error::{Error, Result};
use routes::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Start the HTTP server on the configured address
///
/// # Returns
/// Never returns unless the server shuts down
pub async fn run(config: Config) -> Result<()> {
    let addr = config.server_addr();
    run_on(&addr, config).await
}

/// Start the HTTP server with a specific address
///
/// Useful for tests or when you want to override config
pub async fn run_on(addr: &str, config: Config) -> Result<()> {
    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| Error::Server(format!("Invalid server address: {}", e)))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    serve(listener, config).await
}

/// Serve the API on an already bound listener
pub async fn serve(listener: TcpListener, config: Config) -> Result<()> {
    let state = Arc::new(AppState::new(config)?);
    let app = create_router(state);

    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(format!("Server error: {}", e)))?;

    Ok(())
}
