use std::sync::Mutex;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chirp::config::{ServerConfig, DEFAULT_LOG_FILTER, LOG_ENV};
use chirp::core::db::init_store;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::from_env();
    let store = init_store(&config)?;
    let store = web::Data::new(Mutex::new(store));

    info!(addr = %config.bind_addr, "server listening");

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .configure(chirp::handlers::configure)
    })
    .bind(config.bind_addr.as_str())
    .with_context(|| format!("failed to bind {}", config.bind_addr))?
    .run()
    .await?;

    Ok(())
}
