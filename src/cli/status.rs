//! Status command handler
//!
//! Probes `/health` on a running gateway.

use crate::config::Config;
use crate::error::Result;
use crate::server::routes::HealthResponse;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Address to probe instead of the configured one (host:port)
    #[arg(long)]
    pub addr: Option<String>,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load_with_env()?;
    let addr = args.addr.unwrap_or_else(|| config.server_addr());

    println!("geo-gateway v{}", env!("CARGO_PKG_VERSION"));
    println!();

    match check_health(&addr).await {
        Ok(health) => {
            println!("Server: RUNNING on {}", addr);
            println!("  Status:    {}", health.status);
            println!("  Timestamp: {}", health.timestamp);
        }
        Err(e) => {
            println!("Server: NOT RUNNING on {} ({})", addr, e);
        }
    }

    Ok(())
}

/// Fetch the health report from a gateway at `addr`
pub async fn check_health(addr: &str) -> Result<HealthResponse> {
    let url = format!("http://{}/health", addr);
    let health = reqwest::get(&url)
        .await?
        .error_for_status()?
        .json::<HealthResponse>()
        .await?;
    Ok(health)
}
