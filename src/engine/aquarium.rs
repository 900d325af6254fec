use std::path::PathBuf;
use std::sync::Arc;

use rand::Rng;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::Result;
use crate::classifier::effective_supply;
use crate::classifier::legend;
use crate::config::Config;
use crate::config::load_config_or_default;
use crate::handler::PollEvent;
use crate::handler::PollerOperator;
use crate::handler::ShutdownSignal;
use crate::model::Network;
use crate::model::fish::Fish;
use crate::model::fish::FishTraits;
use crate::model::fish::SwimWindow;
use crate::pipeline::SupplyLookup;
use crate::pipeline::TransferAggregator;
use crate::setup_tracing;
use crate::upstream::PinaxClient;
use crate::upstream::TokenDataSource;
use crate::utils::shorten;

#[derive(Debug, Clone, Default)]
pub struct AquariumArgs {
    pub config_path: PathBuf,
    /// Overrides `poller.network`
    pub network: Option<Network>,
    /// Overrides `poller.contract`. Known symbols such as `USDT` resolve to
    /// the network's contract; an empty string watches the native token
    pub contract: Option<String>,
}

/// Turns poller events into fish. Holds the supply of the current selection.
#[derive(Debug, Clone)]
pub struct Tank {
    supply: Option<f64>,
    window: SwimWindow,
}

impl Tank {
    pub fn new(poll_interval_secs: u64) -> Self {
        Self { supply: None, window: SwimWindow::for_poll_interval(poll_interval_secs as f64) }
    }

    pub fn supply(&self) -> Option<f64> {
        self.supply
    }

    /// Transfers arriving before any supply classify against the fallback
    /// ratio.
    pub fn handle<R: Rng>(
        &mut self,
        event: PollEvent,
        rng: &mut R,
    ) -> Vec<Fish> {
        match event {
            PollEvent::Supply { network, contract, supply } => {
                info!("tank::supply::{}::{}::{}", network, shorten(&contract), supply);
                self.supply = Some(supply);
                for row in legend(effective_supply(supply)) {
                    info!("tank::legend::{}::{}", row.label, row.range);
                }
                Vec::new()
            },
            PollEvent::Transfers { network, transfers, last_block, .. } => {
                debug!("tank::transfers::{}::{}::last_block::{}", network, transfers.len(), last_block);
                let supply = self.supply.map(effective_supply).unwrap_or(0.0);
                transfers
                    .into_iter()
                    .map(|transfer| Fish::spawn(transfer, supply, self.window, FishTraits::random(rng)))
                    .collect()
            },
        }
    }
}

pub struct Aquarium {
    pub config: Config,
    pub poller: PollerOperator,
    pub shutdown: ShutdownSignal,
}

impl Aquarium {
    pub async fn run(args: AquariumArgs) -> Result<()> {
        let mut config = load_config_or_default(&args.config_path);
        setup_tracing("aquarium", &config.logging);
        info!("aquarium::run::config_loaded::{}", args.config_path.display());

        if let Some(network) = args.network {
            config.poller.network = network;
        }
        if let Some(contract) = args.contract {
            config.poller.contract = config.poller.network.resolve_token(&contract);
        }
        for token in config.poller.network.known_tokens() {
            debug!("aquarium::known_token::{}::{}::{}", config.poller.network, token.symbol, token.contract);
        }

        let source: Arc<dyn TokenDataSource> = Arc::new(PinaxClient::new(&config.token_api)?);
        let aggregator = TransferAggregator::new(source.clone(), config.aggregator.clone());
        let supply_lookup = SupplyLookup::new(source);
        let shutdown = ShutdownSignal::new();

        let (poller, mut events) = PollerOperator::new(aggregator, supply_lookup, &config.poller, shutdown.clone());
        let mut tank = Tank::new(config.poller.interval_secs);
        let aquarium = Aquarium { config, poller, shutdown };

        info!(
            "aquarium::watching::{}::{}",
            aquarium.config.poller.network,
            if aquarium.config.poller.contract.is_empty() { "native" } else { aquarium.config.poller.contract.as_str() }
        );

        loop {
            tokio::select! {
                signal = tokio::signal::ctrl_c() => {
                    if let Err(e) = signal {
                        error!("aquarium::ctrl_c_listener_failed::{}", e);
                    }
                    info!("aquarium::shutting_down");
                    aquarium.poller.shutdown();
                    break;
                },
                event = events.recv() => match event {
                    Some(event) => {
                        for fish in tank.handle(event, &mut rand::rng()) {
                            aquarium.log_fish(&fish);
                        }
                    },
                    None => {
                        warn!("aquarium::poller_stopped");
                        break;
                    },
                },
            }
        }

        Ok(())
    }

    fn log_fish(
        &self,
        fish: &Fish,
    ) {
        info!(
            "fish::{}::{}::value::{}::block::{}::scale::{:.3}::swim::{:.1}s::delay::{:.1}s::size::{}x{}{}",
            fish.tier().label(),
            shorten(&fish.transfer.txid),
            fish.transfer.value,
            fish.transfer.block_number,
            fish.visual.scale,
            fish.swim_secs,
            fish.entrance_delay_secs,
            fish.image_width,
            fish.image_height,
            fish.banner.as_deref().map(|b| format!("::banner::{}", b)).unwrap_or_default()
        );
    }
}
