//! Skill, boost and contract endpoints (+ dev-only grant helper).

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    cache::Catalogue,
    db::{card_repo, inventory_repo, Store},
    error::GameError,
    http::auth::PlayerId,
};

#[derive(Deserialize)]
pub struct AddSkillReq {
    pub skill_template_id: i32,
}

#[derive(Deserialize)]
pub struct ApplyBoostReq {
    pub skill_template_id: i32,
    pub user_boost_inventory_id: Uuid,
}

#[derive(Deserialize)]
pub struct ApplyContractReq {
    pub user_contract_inventory_id: Uuid,
}

/// GET /api/inventory/player-cards/{card_id}/skills
#[get("/inventory/player-cards/{card_id}/skills")]
pub async fn card_skills(
    player: PlayerId,
    path: web::Path<Uuid>,
    store: web::Data<Store>,
    catalogue: web::Data<Catalogue>,
) -> Result<HttpResponse, GameError> {
    let skills = card_repo::card_skills(&store, &catalogue, player.0, path.into_inner())?;
    Ok(HttpResponse::Ok().json(skills))
}

/// GET /api/inventory/skill-templates
#[get("/inventory/skill-templates")]
pub async fn skill_templates(catalogue: web::Data<Catalogue>) -> HttpResponse {
    HttpResponse::Ok().json(catalogue.all_skills())
}

/// GET /api/inventory/boosts
#[get("/inventory/boosts")]
pub async fn boosts(
    player: PlayerId,
    store: web::Data<Store>,
    catalogue: web::Data<Catalogue>,
) -> HttpResponse {
    HttpResponse::Ok().json(inventory_repo::boosts(&store, &catalogue, player.0))
}

/// GET /api/inventory/contracts
#[get("/inventory/contracts")]
pub async fn contracts(
    player: PlayerId,
    store: web::Data<Store>,
    catalogue: web::Data<Catalogue>,
) -> HttpResponse {
    HttpResponse::Ok().json(inventory_repo::contracts(&store, &catalogue, player.0))
}

/// GET /api/inventory/impact-cards
#[get("/inventory/impact-cards")]
pub async fn impact_cards(
    player: PlayerId,
    store: web::Data<Store>,
    catalogue: web::Data<Catalogue>,
) -> HttpResponse {
    HttpResponse::Ok().json(inventory_repo::impact_cards(&store, &catalogue, player.0))
}

/// POST /api/inventory/player-cards/{card_id}/add-skill
#[post("/inventory/player-cards/{card_id}/add-skill")]
pub async fn add_skill(
    player: PlayerId,
    path: web::Path<Uuid>,
    info: web::Json<AddSkillReq>,
    store: web::Data<Store>,
    catalogue: web::Data<Catalogue>,
) -> Result<HttpResponse, GameError> {
    let added = card_repo::add_skill(
        &store,
        &catalogue,
        player.0,
        path.into_inner(),
        info.skill_template_id,
    )?;
    Ok(HttpResponse::Created().json(added))
}

/// POST /api/inventory/player-cards/{card_id}/apply-boost
#[post("/inventory/player-cards/{card_id}/apply-boost")]
pub async fn apply_boost(
    player: PlayerId,
    path: web::Path<Uuid>,
    info: web::Json<ApplyBoostReq>,
    store: web::Data<Store>,
    catalogue: web::Data<Catalogue>,
) -> Result<HttpResponse, GameError> {
    let outcome = card_repo::apply_boost(
        &store,
        &catalogue,
        player.0,
        path.into_inner(),
        info.skill_template_id,
        info.user_boost_inventory_id,
    )?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// POST /api/inventory/player-cards/{card_id}/apply-contract
#[post("/inventory/player-cards/{card_id}/apply-contract")]
pub async fn apply_contract(
    player: PlayerId,
    path: web::Path<Uuid>,
    info: web::Json<ApplyContractReq>,
    store: web::Data<Store>,
    catalogue: web::Data<Catalogue>,
) -> Result<HttpResponse, GameError> {
    let outcome = card_repo::apply_contract(
        &store,
        &catalogue,
        player.0,
        path.into_inner(),
        info.user_contract_inventory_id,
        &mut rand::rng(),
    )?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[cfg(debug_assertions)]
#[derive(Deserialize)]
pub struct GrantReq {
    pub kind: inventory_repo::ItemKind,
    pub template_id: i32,
    #[serde(default)]
    pub quantity: u32,
}

/// POST /api/inventory/grant   (debug builds only)
#[cfg(debug_assertions)]
#[post("/inventory/grant")]
pub async fn grant(
    player: PlayerId,
    info: web::Json<GrantReq>,
    store: web::Data<Store>,
    catalogue: web::Data<Catalogue>,
) -> Result<HttpResponse, GameError> {
    let stack = inventory_repo::grant(
        &store,
        &catalogue,
        player.0,
        info.kind,
        info.template_id,
        info.quantity,
    )?;
    Ok(HttpResponse::Ok().json(stack))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(card_skills)
        .service(skill_templates)
        .service(boosts)
        .service(contracts)
        .service(impact_cards)
        .service(add_skill)
        .service(apply_boost)
        .service(apply_contract);

    #[cfg(debug_assertions)]
    cfg.service(grant);
}
