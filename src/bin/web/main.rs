//! REST server for the tournament engine.
//! Run with: cargo run --bin web
//! Configured from the environment: HOST, PORT, BASE_URL, UPLOADS_DIR.

mod config;
mod routes;

use std::collections::HashMap;

use actix_files::Files;
use actix_web::{web::Data, App, HttpServer};
use copa_tournament::{Tournament, TournamentId};
use tokio::sync::RwLock;

use crate::config::ServerConfig;

/// In-memory store of tournaments by id. Writers hold the lock for a whole
/// operation, so updates to one tournament never interleave.
pub type AppState = Data<RwLock<HashMap<TournamentId, Tournament>>>;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    std::fs::create_dir_all(&config.uploads_dir)?;
    log::info!(
        "Starting server at http://{}:{} (public URL {})",
        config.host,
        config.port,
        config.base_url
    );

    let state: AppState = Data::new(RwLock::new(HashMap::new()));

    let bind = (config.host.clone(), config.port);
    let uploads_dir = config.uploads_dir.clone();
    let config = Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .service(routes::api_health)
            .service(routes::api_countries)
            .service(routes::api_create_tournament)
            .service(routes::api_get_tournament)
            .service(routes::api_list_teams)
            .service(routes::api_register_team)
            .service(routes::api_import_teams)
            .service(routes::api_group_draw)
            .service(routes::api_qualifying_draw)
            .service(routes::api_create_tie)
            .service(routes::api_record_penalties)
            .service(routes::api_create_match)
            .service(routes::api_submit_result)
            .service(routes::api_standings)
            .service(routes::api_knockout_draw)
            .service(Files::new("/uploads", uploads_dir.clone()))
    })
    .bind(bind)?
    .run()
    .await
}
