//! Application state initialization
//!
//! Wires the external clients into the relay and read services.
use std::sync::Arc;

use actix_web::web;
use color_eyre::Result;
use log::info;

use crate::{
    config::ServerConfig,
    constants::QR_HORIZONTAL_PADDING,
    domain::{ReadService, RelayService, TransactionBuilder},
    models::AppState,
    services::{
        build_http_client, HeliusDasService, HyperspaceService, QrCodePngRenderer,
        SolanaProvider,
    },
    utils::mask_url,
};

/// Initializes application state
///
/// # Errors
///
/// Returns error if the RPC URL is malformed or the HTTP client cannot be built.
pub fn initialize_app_state(server_config: Arc<ServerConfig>) -> Result<web::ThinData<AppState>> {
    let provider = Arc::new(SolanaProvider::new(
        &server_config.solana_rpc_url,
        server_config.rpc_timeout_seconds,
    )?);
    info!(
        "Solana RPC endpoint: {}",
        mask_url(&server_config.solana_rpc_url)
    );

    let http_client = build_http_client(server_config.rpc_timeout_seconds)?;
    let das = Arc::new(HeliusDasService::new(
        http_client.clone(),
        server_config.helius_rpc_url.clone(),
    ));
    let marketplace = Arc::new(HyperspaceService::new(
        http_client,
        server_config.hyperspace_api_url.clone(),
        server_config.hyperspace_api_key.clone(),
    ));
    info!(
        "DAS endpoint: {}, marketplace endpoint: {}",
        mask_url(&server_config.helius_rpc_url),
        mask_url(&server_config.hyperspace_api_url)
    );

    let builder = TransactionBuilder::new(
        provider.clone(),
        marketplace.clone(),
        server_config.metadata_program_id,
    );
    let relay_service = Arc::new(RelayService::new(
        &server_config,
        builder,
        Arc::new(QrCodePngRenderer::new(QR_HORIZONTAL_PADDING)),
    ));
    let read_service = Arc::new(ReadService::new(provider, das, marketplace));

    Ok(web::ThinData(AppState {
        config: server_config,
        relay_service,
        read_service,
    }))
}
