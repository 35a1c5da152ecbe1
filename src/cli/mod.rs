//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod distance;
pub mod serve;
pub mod status;

use clap::{Parser, Subcommand};

/// Geolocation HTTP gateway
#[derive(Parser)]
#[command(name = "geo-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the gateway (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Check whether a gateway is running
    Status(status::StatusArgs),

    /// Compute the great-circle distance between two points
    Distance(distance::DistanceArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Status(args) => status::run(args).await,
        Commands::Distance(args) => distance::run(args),
    }
}
