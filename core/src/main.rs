mod cors;

use std::{io, sync::Arc};

use actix_web::{
    App, HttpServer,
    web::{self},
};
use common::env_config::{Config, StoreConfig};
use db::{
    memory::MemoryAccountStore,
    store::{PgAccountStore, SharedStore},
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // get env vars
    let config = Config::from_env().map_err(io::Error::other)?;
    let config_data = config.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup(config.log_level, &config.log_file).map_err(io::Error::other)?;
    }

    // init account store
    let store: SharedStore = match &config.store {
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = db::setup(database_url, *max_connections, config.is_production())
                .await
                .map_err(|e| io::Error::other(format!("Failed to set up database: {}", e)))?;
            Arc::new(PgAccountStore::new(pool))
        }
        StoreConfig::Memory => {
            log::warn!("Using the in-memory account store, accounts are lost on restart");
            Arc::new(MemoryAccountStore::new())
        }
    };

    // init document storage
    let documents = storage::from_config(&config.storage);

    log::info!(
        "Starting server on {}:{} ({} workers)",
        config.server_host,
        config.server_port,
        config.num_workers
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(documents.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .app_data(common::http::json_config())
            .wrap(logger::middleware()) // 3rd
            .wrap(extractor::middleware(config_data.jwt_config.clone())) // 2nd
            .wrap(cors::middleware(&config_data.cors_allowed_origin)) // 1st
            .service(
                web::scope("/api")
                    .service(api_driver::mount_driver())
                    .service(api_passenger::mount_passenger())
                    .service(api_admin::mount_admin().wrap(api_admin::middleware())),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
