//! Card collection endpoints.

use actix_web::{get, post, web, HttpResponse};
use serde_json::json;

use crate::{
    cache::Catalogue,
    config::settings,
    db::{card_repo, Store},
    error::GameError,
    game::card::ContractState,
    http::auth::PlayerId,
};

/// POST /api/cards/starter-pack
#[post("/cards/starter-pack")]
pub async fn starter_pack(
    player: PlayerId,
    store: web::Data<Store>,
    catalogue: web::Data<Catalogue>,
) -> Result<HttpResponse, GameError> {
    let cfg = settings();
    let contract = ContractState {
        games_remaining: cfg.new_card_games,
        renewals_left: cfg.new_card_renewals,
    };
    let cards =
        card_repo::grant_starter_pack(&store, &catalogue, player.0, contract, &mut rand::rng())?;
    Ok(HttpResponse::Created().json(json!({ "cards": cards })))
}

/// GET /api/cards/starter-pack-status
#[get("/cards/starter-pack-status")]
pub async fn starter_pack_status(player: PlayerId, store: web::Data<Store>) -> HttpResponse {
    let available = card_repo::starter_pack_available(&store, player.0);
    HttpResponse::Ok().json(json!({ "available": available }))
}

/// GET /api/cards/mine
#[get("/cards/mine")]
pub async fn my_cards(
    player: PlayerId,
    store: web::Data<Store>,
    catalogue: web::Data<Catalogue>,
) -> HttpResponse {
    HttpResponse::Ok().json(card_repo::my_cards(&store, &catalogue, player.0))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(starter_pack)
        .service(starter_pack_status)
        .service(my_cards);
}
