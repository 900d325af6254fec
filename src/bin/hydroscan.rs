// ─────────────────────────────────────────────────────────────────────────────
//  HydroScan: Aquarium Feed
//
//  Watches token transfers on one network and releases each of them into the
//  tank as a fish sized by its share of the token supply.
// ─────────────────────────────────────────────────────────────────────────────
use std::path::PathBuf;

use clap::Parser;
use hydroscan::engine::Aquarium;
use hydroscan::engine::AquariumArgs;
use hydroscan::error::Result;
use hydroscan::model::Network;

#[derive(Debug, Parser)]
#[command(name = "hydroscan", about = "Token transfers as an aquarium feed")]
struct Cli {
    /// Path to the TOML config
    #[arg(long, default_value = "Config.toml")]
    config: PathBuf,

    /// Network id, e.g. mainnet, base, solana, tron
    #[arg(long)]
    network: Option<Network>,

    /// Token contract, mint or known symbol (USDT, USDC, ...); pass an empty
    /// string for the native token
    #[arg(long)]
    contract: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    Aquarium::run(AquariumArgs { config_path: cli.config, network: cli.network, contract: cli.contract }).await?;
    Ok(())
}
