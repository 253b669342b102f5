use actix_web::{middleware::Logger, web, App, HttpServer};
use puckdeck_server::{cache, config::settings, db::Store, http};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cfg = settings();

    // Static templates, loaded once
    let catalogue = web::Data::new(cache::warm_all(cfg.catalog_path.as_deref()).await);
    let store = web::Data::new(Store::new());

    log::info!("listening on {}", cfg.server_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(catalogue.clone())
            .app_data(store.clone())
            .configure(http::routes::init_routes)
    })
    .bind(&cfg.server_addr)?
    .run()
    .await
}
