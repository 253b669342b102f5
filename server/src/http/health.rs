//! Simple liveness probe

use actix_web::{get, web, HttpResponse, Responder};

use crate::cache::Catalogue;

#[get("/healthz")]
pub async fn healthz(catalogue: web::Data<Catalogue>) -> impl Responder {
    if catalogue.cards.is_empty() {
        return HttpResponse::ServiceUnavailable().body("catalogue");
    }
    HttpResponse::Ok().body("ok")
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(healthz);
}
