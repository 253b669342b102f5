//! Roster and match endpoints.

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::{
    cache::Catalogue,
    db::{team_repo, Store},
    error::GameError,
    game::types::FieldSlot,
    http::auth::PlayerId,
};

#[derive(Deserialize)]
pub struct SaveRosterReq {
    /// Slots left out are stored empty.
    pub roster: BTreeMap<FieldSlot, Option<Uuid>>,
}

#[derive(Deserialize)]
pub struct PlaceReq {
    pub user_card_id: Uuid,
    pub field_position: FieldSlot,
}

#[derive(Deserialize)]
pub struct UnassignReq {
    pub user_card_id: Uuid,
}

#[derive(Deserialize)]
pub struct BattleStatsReq {
    #[serde(default)]
    pub impact_card_ids: Vec<i32>,
}

#[derive(Deserialize)]
pub struct FinishMatchReq {
    #[serde(default)]
    pub participating_card_ids: Vec<Uuid>,
}

/// GET /api/team/roster
#[get("/team/roster")]
pub async fn get_roster(player: PlayerId, store: web::Data<Store>) -> HttpResponse {
    HttpResponse::Ok().json(team_repo::roster(&store, player.0))
}

/// POST /api/team/roster
#[post("/team/roster")]
pub async fn save_roster(
    player: PlayerId,
    info: web::Json<SaveRosterReq>,
    store: web::Data<Store>,
    catalogue: web::Data<Catalogue>,
) -> Result<HttpResponse, GameError> {
    let view = team_repo::save_roster(&store, &catalogue, player.0, &info.roster)?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/team/roster/place
#[post("/team/roster/place")]
pub async fn place_card(
    player: PlayerId,
    info: web::Json<PlaceReq>,
    store: web::Data<Store>,
    catalogue: web::Data<Catalogue>,
) -> Result<HttpResponse, GameError> {
    let view = team_repo::place_card(
        &store,
        &catalogue,
        player.0,
        info.user_card_id,
        info.field_position,
    )?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/team/roster/unassign
#[post("/team/roster/unassign")]
pub async fn unassign_card(
    player: PlayerId,
    info: web::Json<UnassignReq>,
    store: web::Data<Store>,
) -> Result<HttpResponse, GameError> {
    let view = team_repo::unassign_card(&store, player.0, info.user_card_id)?;
    Ok(HttpResponse::Ok().json(view))
}

/// GET /api/team/status
#[get("/team/status")]
pub async fn team_status(
    player: PlayerId,
    store: web::Data<Store>,
    catalogue: web::Data<Catalogue>,
) -> HttpResponse {
    HttpResponse::Ok().json(team_repo::team_rating(&store, &catalogue, player.0))
}

/// POST /api/team/battle-stats
#[post("/team/battle-stats")]
pub async fn battle_stats(
    player: PlayerId,
    info: web::Json<BattleStatsReq>,
    store: web::Data<Store>,
    catalogue: web::Data<Catalogue>,
) -> Result<HttpResponse, GameError> {
    let entries = team_repo::team_battle_stats(&store, &catalogue, player.0, &info.impact_card_ids)?;
    Ok(HttpResponse::Ok().json(json!({ "team": entries })))
}

/// POST /api/team/finish-match
#[post("/team/finish-match")]
pub async fn finish_match(
    player: PlayerId,
    info: web::Json<FinishMatchReq>,
    store: web::Data<Store>,
) -> Result<HttpResponse, GameError> {
    let updated = team_repo::finish_match(&store, player.0, &info.participating_card_ids)?;
    Ok(HttpResponse::Ok().json(json!({ "updated_cards": updated })))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_roster)
        .service(save_roster)
        .service(place_card)
        .service(unassign_card)
        .service(team_status)
        .service(battle_stats)
        .service(finish_match);
}
