use actix_web::Scope;
use actix_web::web;

use super::handlers::get_supply;
use super::handlers::get_tiers;
use super::handlers::get_transfers;

pub fn api_routes() -> Scope {
    web::scope("/api")
        .route("/transfers", web::post().to(get_transfers))
        .route("/supply", web::post().to(get_supply))
        .route("/tiers", web::get().to(get_tiers))
}
