//! Test helpers for building an `AppState` around mocked collaborators.
use std::sync::Arc;

use actix_web::web;
use solana_sdk::pubkey::Pubkey;

use crate::{
    config::ServerConfig,
    domain::{ReadService, RelayService, TransactionBuilder},
    models::AppState,
    services::{
        MockDasServiceTrait, MockMarketplaceServiceTrait, MockQrRendererTrait,
        MockSolanaProviderTrait,
    },
};

pub const TEST_SELF_URL: &str = "https://relay.test";

pub fn create_test_config(metadata_program_id: Pubkey) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".into(),
        port: 3333,
        dev: false,
        self_url: TEST_SELF_URL.into(),
        solana_rpc_url: "http://localhost:8899".into(),
        helius_rpc_url: "http://localhost:8900/?api-key=test".into(),
        hyperspace_api_url: "http://localhost:8901/graphql".into(),
        hyperspace_api_key: "test".into(),
        metadata_program_id,
        rpc_timeout_seconds: 5,
        solana_pay_label: "Solana GPT Plugin".into(),
        well_known_dir: "./.well-known".into(),
    }
}

#[derive(Default)]
pub struct MockCollaborators {
    pub provider: MockSolanaProviderTrait,
    pub das: MockDasServiceTrait,
    pub marketplace: MockMarketplaceServiceTrait,
    pub qr_renderer: MockQrRendererTrait,
}

pub fn create_mock_app_state(
    collaborators: MockCollaborators,
    config: ServerConfig,
) -> web::ThinData<AppState> {
    let provider = Arc::new(collaborators.provider);
    let marketplace = Arc::new(collaborators.marketplace);

    let builder = TransactionBuilder::new(
        provider.clone(),
        marketplace.clone(),
        config.metadata_program_id,
    );
    let relay_service = Arc::new(RelayService::new(
        &config,
        builder,
        Arc::new(collaborators.qr_renderer),
    ));
    let read_service = Arc::new(ReadService::new(
        provider,
        Arc::new(collaborators.das),
        marketplace,
    ));

    web::ThinData(AppState {
        config: Arc::new(config),
        relay_service,
        read_service,
    })
}
