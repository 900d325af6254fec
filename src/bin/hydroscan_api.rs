// ─────────────────────────────────────────────────────────────────────────────
//  HydroScan: API
//
//  Transfer, supply and tier legend routes for the aquarium UI.
// ─────────────────────────────────────────────────────────────────────────────
use std::path::PathBuf;

use clap::Parser;
use hydroscan::config::load_config_or_default;
use hydroscan::error::Result;
use hydroscan::server::run_server;
use hydroscan::setup_tracing;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "hydroscan-api", about = "HTTP API for the HydroScan aquarium")]
struct Cli {
    #[arg(long, default_value = "Config.toml")]
    config: PathBuf,

    /// Overrides `server.port`
    #[arg(long)]
    port: Option<u16>,
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = load_config_or_default(&cli.config);
    setup_tracing("api", &config.logging);
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    info!("api::run::config_loaded::{}", cli.config.display());

    run_server(config).await
}
