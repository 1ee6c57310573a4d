//! # Solana Pay Relayer
//!
//! HTTP entry point. Loads configuration from the environment, wires the
//! chain and marketplace clients, and serves the plugin routes.
//!
//! ## Environment
//!
//! See `.env.example` for the full list. `HYPERSPACE_API_KEY` and
//! `ON_CHAIN_METADATA_PROGRAM` are required.
use std::sync::Arc;

use actix_web::{
    middleware::{self, Logger},
    App, HttpServer,
};
use color_eyre::Result;
use dotenvy::dotenv;
use log::info;

use solana_pay_relayer::{
    api::routes::configure_routes, bootstrap::initialize_app_state, config::ServerConfig,
    constants::DEFAULT_CLIENT_DISCONNECT_TIMEOUT_SECONDS, logging::setup_logging,
};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // Load environment variables from .env file
    dotenv().ok();
    setup_logging()?;

    let config = Arc::new(ServerConfig::from_env()?);
    let app_state = initialize_app_state(config.clone())?;

    info!(
        "Starting server on {}:{} (public url {})",
        config.host, config.port, config.self_url
    );
    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*")))
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .shutdown_timeout(DEFAULT_CLIENT_DISCONNECT_TIMEOUT_SECONDS);

    info!("Server running at http://{}:{}", config.host, config.port);

    server.run().await?;
    Ok(())
}
