pub mod handlers;
pub mod routes;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware;
use actix_web::web;
use tracing::info;

pub use handlers::AppState;
pub use routes::api_routes;

use crate::Result;
use crate::config::Config;
use crate::err_with_loc;
use crate::error::HandlerError;
use crate::pipeline::SupplyLookup;
use crate::pipeline::TransferAggregator;
use crate::upstream::PinaxClient;
use crate::upstream::TokenDataSource;

impl AppState {
    pub fn from_source(
        source: Arc<dyn TokenDataSource>,
        config: &Config,
    ) -> Self {
        Self {
            aggregator: TransferAggregator::new(source.clone(), config.aggregator.clone()),
            supply: SupplyLookup::new(source),
        }
    }
}

/// Serves the API until the server is stopped (ctrl-c).
pub async fn run_server(config: Config) -> Result<()> {
    let source: Arc<dyn TokenDataSource> = Arc::new(PinaxClient::new(&config.token_api)?);
    let state = web::Data::new(AppState::from_source(source, &config));
    let (host, port) = (config.server.host.clone(), config.server.port);

    let server = HttpServer::new(move || {
        let cors = Cors::default().allow_any_origin().allow_any_method().allow_any_header();

        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .app_data(state.clone())
            .service(api_routes())
    })
    .bind((host.as_str(), port))
    .map_err(|e| err_with_loc!(HandlerError::ServerStartError(format!("{}:{}: {}", host, port, e))))?
    .run();

    info!("server::listening::{}:{}", host, port);
    server.await.map_err(|e| err_with_loc!(HandlerError::ServerStartError(e.to_string())))?;
    info!("server::stopped");
    Ok(())
}
