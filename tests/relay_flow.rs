//! End-to-end relay flow through the HTTP routes, with in-process chain and
//! marketplace providers standing in for the network.
use std::sync::{Arc, Mutex};

use actix_web::{http::StatusCode, test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};
use solana_pay_relayer::{
    api::routes::configure_routes,
    config::ServerConfig,
    domain::{ReadService, RelayService, TransactionBuilder},
    models::{
        AppState, FloorPriceFilter, ListingSnapshot, ProjectStat, ProviderPage, SignatureRecord,
        SortOrder,
    },
    services::{
        DasError, DasServiceTrait, MarketplaceError, MarketplaceServiceTrait, QrCodePngRenderer,
        SolanaProviderError, SolanaProviderTrait,
    },
    utils::base64_decode,
};
use solana_sdk::{
    hash::Hash, pubkey::Pubkey, signature::Signature, system_program, transaction::Transaction,
};

const BASE_URL: &str = "https://relay.test";

struct FakeChain {
    blockhash: Option<Hash>,
    blockhash_requests: Mutex<usize>,
}

impl FakeChain {
    fn healthy(blockhash: Hash) -> Self {
        Self {
            blockhash: Some(blockhash),
            blockhash_requests: Mutex::new(0),
        }
    }

    fn unreachable() -> Self {
        Self {
            blockhash: None,
            blockhash_requests: Mutex::new(0),
        }
    }
}

#[async_trait]
impl SolanaProviderTrait for FakeChain {
    async fn get_balance(&self, _address: &Pubkey) -> Result<u64, SolanaProviderError> {
        Ok(2_000_000_000)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, SolanaProviderError> {
        *self.blockhash_requests.lock().unwrap() += 1;
        self.blockhash.ok_or_else(|| {
            SolanaProviderError::NetworkError("connection refused by 10.0.0.7".into())
        })
    }

    async fn get_account_info(
        &self,
        _address: &Pubkey,
    ) -> Result<Option<Value>, SolanaProviderError> {
        Ok(None)
    }

    async fn get_signatures_for_address(
        &self,
        _address: &Pubkey,
        _before: Option<String>,
        _until: Option<String>,
        _limit: usize,
    ) -> Result<Vec<SignatureRecord>, SolanaProviderError> {
        Ok(vec![])
    }

    async fn get_transaction(&self, _signature: &Signature) -> Result<Value, SolanaProviderError> {
        Ok(Value::Null)
    }
}

struct FakeDas;

#[async_trait]
impl DasServiceTrait for FakeDas {
    async fn get_assets_by_owner(
        &self,
        _owner: &Pubkey,
        _page: u32,
        _limit: u32,
    ) -> Result<Value, DasError> {
        Ok(json!({"total": 0, "items": []}))
    }
}

struct FakeMarketplace {
    buy_tx: Vec<u8>,
}

#[async_trait]
impl MarketplaceServiceTrait for FakeMarketplace {
    async fn create_buy_tx(
        &self,
        _buyer: &Pubkey,
        _token: &Pubkey,
        _price: f64,
    ) -> Result<Vec<u8>, MarketplaceError> {
        Ok(self.buy_tx.clone())
    }

    async fn get_listing_snapshots(
        &self,
        _project_id: &str,
        _page_number: u32,
        _sort_order: SortOrder,
    ) -> Result<ProviderPage<ListingSnapshot>, MarketplaceError> {
        Ok(ProviderPage {
            items: vec![],
            has_next_page: false,
        })
    }

    async fn get_project_stats(
        &self,
        _filter: FloorPriceFilter,
        _page_number: u32,
        _page_size: usize,
        _sort_order: SortOrder,
    ) -> Result<ProviderPage<ProjectStat>, MarketplaceError> {
        Ok(ProviderPage {
            items: vec![],
            has_next_page: false,
        })
    }
}

fn config(metadata_program_id: Pubkey) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".into(),
        port: 3333,
        dev: false,
        self_url: BASE_URL.into(),
        solana_rpc_url: "http://localhost:8899".into(),
        helius_rpc_url: "http://localhost:8900".into(),
        hyperspace_api_url: "http://localhost:8901/graphql".into(),
        hyperspace_api_key: "test".into(),
        metadata_program_id,
        rpc_timeout_seconds: 5,
        solana_pay_label: "Solana GPT Plugin".into(),
        well_known_dir: "./.well-known".into(),
    }
}

fn app_state(
    chain: Arc<FakeChain>,
    marketplace: Arc<FakeMarketplace>,
    metadata_program_id: Pubkey,
) -> web::ThinData<AppState> {
    let config = config(metadata_program_id);
    let builder = TransactionBuilder::new(chain.clone(), marketplace.clone(), metadata_program_id);
    let relay_service = Arc::new(RelayService::new(
        &config,
        builder,
        Arc::new(QrCodePngRenderer::new(110)),
    ));
    let read_service = Arc::new(ReadService::new(chain, Arc::new(FakeDas), marketplace));
    web::ThinData(AppState {
        config: Arc::new(config),
        relay_service,
        read_service,
    })
}

fn default_marketplace() -> Arc<FakeMarketplace> {
    Arc::new(FakeMarketplace { buy_tx: vec![] })
}

/// Path and query of a link issued under `BASE_URL`.
fn local_path(link: &str) -> &str {
    link.strip_prefix(BASE_URL).expect("link under base url")
}

fn decode_transaction(envelope: &Value) -> Transaction {
    let bytes = base64_decode(envelope["transaction"].as_str().unwrap()).unwrap();
    bincode::deserialize(&bytes).unwrap()
}

#[actix_web::test]
async fn close_metadata_relay_end_to_end() {
    let program = Pubkey::new_unique();
    let account = Pubkey::new_unique();
    let owner = Pubkey::new_unique();
    let blockhash = Hash::new_unique();
    let chain = Arc::new(FakeChain::healthy(blockhash));

    let app = test::init_service(
        App::new()
            .app_data(app_state(chain.clone(), default_marketplace(), program))
            .configure(configure_routes),
    )
    .await;

    // Stage 0: issue the link
    let req = test::TestRequest::post()
        .uri("/createCloseNFTMetadata")
        .set_json(json!({"account": account.to_string(), "owner": owner.to_string()}))
        .to_request();
    let issued: Value = test::call_and_read_body_json(&app, req).await;
    let link = issued["linkToSign"].as_str().unwrap().to_string();
    assert_eq!(
        link,
        format!("{BASE_URL}/page/createCloseNFTMetadata?account={account}&owner={owner}")
    );

    // Stage 1: preview page
    let req = test::TestRequest::get().uri(local_path(&link)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    let qr_url = format!("{BASE_URL}/qr/createCloseNFTMetadata?account={account}&amp;owner={owner}");
    assert!(html.contains(&qr_url));

    // Stage 2: QR image
    let qr_path = format!("/qr/createCloseNFTMetadata?account={account}&owner={owner}");
    let req = test::TestRequest::get().uri(&qr_path).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let png = test::read_body(resp).await;
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    // Stage 3: wallet handshake
    let sign_path = format!("/sign/createCloseNFTMetadata?account={account}&owner={owner}");
    let req = test::TestRequest::get().uri(&sign_path).to_request();
    let metadata: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(metadata["label"], "Solana GPT Plugin");

    assert_eq!(*chain.blockhash_requests.lock().unwrap(), 0);

    let req = test::TestRequest::post()
        .uri(&sign_path)
        .set_json(json!({"account": owner.to_string()}))
        .to_request();
    let envelope: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(envelope["message"], "Sign to Close NFT Metadata");
    assert_eq!(*chain.blockhash_requests.lock().unwrap(), 1);

    let tx = decode_transaction(&envelope);
    assert_eq!(tx.message.recent_blockhash, blockhash);
    assert_eq!(tx.message.account_keys[0], owner);
    assert_eq!(tx.signatures, vec![Signature::default()]);
    assert_eq!(tx.message.instructions.len(), 1);

    let ix = &tx.message.instructions[0];
    assert_eq!(tx.message.account_keys[ix.program_id_index as usize], program);
    let accounts: Vec<Pubkey> = ix
        .accounts
        .iter()
        .map(|i| tx.message.account_keys[*i as usize])
        .collect();
    assert_eq!(accounts, vec![account, owner, owner]);
}

#[actix_web::test]
async fn transfer_sol_uses_wallet_account_as_sender() {
    let wallet = Pubkey::new_unique();
    let destination = Pubkey::new_unique();
    let chain = Arc::new(FakeChain::healthy(Hash::new_unique()));

    let app = test::init_service(
        App::new()
            .app_data(app_state(chain, default_marketplace(), Pubkey::new_unique()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!(
            "/sign/createTransferSol?destination={destination}&amount=0.5"
        ))
        .set_json(json!({"account": wallet.to_string()}))
        .to_request();
    let envelope: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(envelope["message"], "Sign to Transfer SOL");

    let tx = decode_transaction(&envelope);
    assert_eq!(tx.message.account_keys[0], wallet);
    let ix = &tx.message.instructions[0];
    assert_eq!(
        tx.message.account_keys[ix.program_id_index as usize],
        system_program::id()
    );
    assert_eq!(tx.message.account_keys[ix.accounts[1] as usize], destination);
}

#[actix_web::test]
async fn buy_transaction_is_passed_through() {
    let buy_tx = vec![1u8, 2, 3, 4, 5];
    let marketplace = Arc::new(FakeMarketplace {
        buy_tx: buy_tx.clone(),
    });
    let chain = Arc::new(FakeChain::healthy(Hash::new_unique()));

    let app = test::init_service(
        App::new()
            .app_data(app_state(chain.clone(), marketplace, Pubkey::new_unique()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!(
            "/sign/createBuyNFT?buyer={}&token={}&price=1.5",
            Pubkey::new_unique(),
            Pubkey::new_unique()
        ))
        .to_request();
    let envelope: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        base64_decode(envelope["transaction"].as_str().unwrap()).unwrap(),
        buy_tx
    );
    assert_eq!(*chain.blockhash_requests.lock().unwrap(), 0);
}

#[actix_web::test]
async fn unknown_operation_and_chain_failure() {
    let chain = Arc::new(FakeChain::unreachable());
    let app = test::init_service(
        App::new()
            .app_data(app_state(chain, default_marketplace(), Pubkey::new_unique()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/nonexistentOp")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Invalid method name nonexistentOp"}));

    let req = test::TestRequest::post()
        .uri(&format!(
            "/sign/createCloseNFTMetadata?account={}&owner={}",
            Pubkey::new_unique(),
            Pubkey::new_unique()
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = test::read_body(resp).await;
    assert_eq!(body, r#"{"message":"An error occurred"}"#);
    assert!(!String::from_utf8_lossy(&body).contains("10.0.0.7"));
}

#[actix_web::test]
async fn reads_and_static_files() {
    let chain = Arc::new(FakeChain::healthy(Hash::new_unique()));
    let app = test::init_service(
        App::new()
            .app_data(app_state(chain, default_marketplace(), Pubkey::new_unique()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/getBalance")
        .set_json(json!({"address": Pubkey::new_unique().to_string()}))
        .to_request();
    let balance: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(balance, json!({"sol": 2.0}));

    let req = test::TestRequest::get().uri("/health").to_request();
    assert_eq!(test::call_and_read_body(&app, req).await, "OK");

    let req = test::TestRequest::get()
        .uri("/.well-known/ai-plugin.json")
        .to_request();
    let manifest: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(manifest["schema_version"], "v1");

    let req = test::TestRequest::get()
        .uri("/.well-known/missing.json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
