use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use std::io;
use std::sync::Arc;

use taskvault::auth::TokenService;
use taskvault::config::Config;
use taskvault::routes::{self, health};
use taskvault::store::{MemoryStore, PgStore};
use taskvault::AppState;

fn startup_error<E: std::fmt::Display>(err: E) -> io::Error {
    log::error!("Startup failed: {}", err);
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

async fn build_state(config: &Config) -> io::Result<AppState> {
    let tokens = TokenService::from_config(config);

    match &config.database_url {
        Some(database_url) => {
            let store = Arc::new(PgStore::connect(database_url).await.map_err(startup_error)?);
            store.migrate().await.map_err(startup_error)?;
            log::info!("Using PostgreSQL store");
            Ok(AppState::new(store.clone(), store, tokens))
        }
        None => {
            log::warn!("DATABASE_URL is not set; data is kept in memory and lost on restart");
            let store = Arc::new(MemoryStore::new());
            Ok(AppState::new(store.clone(), store, tokens))
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Refuse to start without a signing secret.
    let config = Config::from_env().map_err(startup_error)?;
    let state = web::Data::new(build_state(&config).await?);

    log::info!("Starting server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(routes::config))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
