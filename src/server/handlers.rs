use actix_web::HttpResponse;
use actix_web::ResponseError;
use actix_web::http::StatusCode;
use actix_web::web;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::classifier::LegendRow;
use crate::classifier::effective_supply;
use crate::classifier::legend;
use crate::error::AggregateError;
use crate::pipeline::Aggregation;
use crate::pipeline::SupplyLookup;
use crate::pipeline::TransferAggregator;

pub struct AppState {
    pub aggregator: TransferAggregator,
    pub supply: SupplyLookup,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransfersRequest {
    pub selected_chain: String,
    #[serde(default)]
    pub contract: Option<String>,
    #[serde(default)]
    pub last_block: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyRequest {
    pub selected_chain: String,
    #[serde(default)]
    pub contract: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SupplyResponse {
    pub supply: f64,
}

#[derive(Debug, Deserialize)]
pub struct TiersQuery {
    /// Raw token supply, scaled down the same way the aquarium does
    pub supply: f64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

impl ResponseError for AggregateError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(AggregateError::status_code(self)).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(ResponseError::status_code(self)).json(ErrorBody { error: self.public_message() })
    }
}

pub async fn get_transfers(
    data: web::Data<AppState>,
    request: web::Json<TransfersRequest>,
) -> Result<web::Json<Aggregation>, AggregateError> {
    let TransfersRequest { selected_chain, contract, last_block } = request.into_inner();
    debug!("api::transfers::{}::{:?}::{:?}", selected_chain, contract, last_block);
    let aggregation = data.aggregator.aggregate(&selected_chain, contract.as_deref(), last_block).await?;
    Ok(web::Json(aggregation))
}

pub async fn get_supply(
    data: web::Data<AppState>,
    request: web::Json<SupplyRequest>,
) -> Result<web::Json<SupplyResponse>, AggregateError> {
    let SupplyRequest { selected_chain, contract } = request.into_inner();
    debug!("api::supply::{}::{:?}", selected_chain, contract);
    let supply = data.supply.lookup(&selected_chain, contract.as_deref()).await?;
    Ok(web::Json(SupplyResponse { supply }))
}

pub async fn get_tiers(query: web::Query<TiersQuery>) -> web::Json<Vec<LegendRow>> {
    web::Json(legend(effective_supply(query.supply)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::App;
    use actix_web::test;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::Config;
    use crate::test_utils::mocks::ScriptedSource;
    use crate::upstream::TokenDataSource;

    fn state(source: ScriptedSource) -> web::Data<AppState> {
        let source: Arc<dyn TokenDataSource> = Arc::new(source);
        web::Data::new(AppState::from_source(source, &Config::default()))
    }

    #[actix_web::test]
    async fn unsupported_chain_is_bad_request() {
        let source = ScriptedSource::evm_pages(&[3], 100);
        let app = test::init_service(
            App::new().app_data(state(source.clone())).service(crate::server::api_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/transfers")
            .set_json(serde_json::json!({ "selectedChain": "xyz", "contract": "", "lastBlock": null }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.error, "Unsupported chain");
        assert_eq!(source.calls(), 0);
    }

    #[actix_web::test]
    async fn transfers_return_camel_case_aggregation() {
        let app = test::init_service(
            App::new()
                .app_data(state(ScriptedSource::evm_pages(&[3], 100)))
                .service(crate::server::api_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/transfers")
            .set_json(serde_json::json!({
                "selectedChain": "mainnet",
                "contract": "0xdAC17F958D2ee523a2206206994597C13D831ec7",
                "lastBlock": 50
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["lastBlock"], 102);
        assert_eq!(body["transfers"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["transfers"][0]["blockNumber"], 100);
    }

    #[actix_web::test]
    async fn missing_supply_metadata_is_not_found() {
        let app = test::init_service(
            App::new().app_data(state(ScriptedSource::default())).service(crate::server::api_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/supply")
            .set_json(serde_json::json!({ "selectedChain": "base", "contract": "0xabc" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.error, "Token not found");
    }

    #[actix_web::test]
    async fn native_supply_needs_no_upstream() {
        let app = test::init_service(
            App::new().app_data(state(ScriptedSource::default())).service(crate::server::api_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/supply")
            .set_json(serde_json::json!({ "selectedChain": "tron", "contract": "" }))
            .to_request();
        let body: SupplyResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, SupplyResponse { supply: 98_670_000_000.0 });
    }

    #[actix_web::test]
    async fn tiers_scale_supply_before_building_legend() {
        let app = test::init_service(App::new().service(crate::server::api_routes())).await;

        let req = test::TestRequest::get().uri("/api/tiers?supply=100000000000").to_request();
        let rows: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let rows = rows.as_array().cloned().unwrap_or_default();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0]["tier"], "bottomFeeder");
        assert_eq!(rows[6]["label"], "Blue Whale");
        assert_eq!(rows[6]["maxValue"], serde_json::Value::Null);
        // effective supply 1e9, whale threshold 1e-3
        let whale_min = rows[6]["minValue"].as_f64().unwrap_or_default();
        assert!((whale_min - 1_000_000.0).abs() < 1e-3, "{whale_min}");
    }
}
