//! Digital Asset Standard (DAS) indexer client.
//!
//! Speaks JSON-RPC over HTTP to a Helius endpoint. The endpoint URL embeds
//! the API key, so it is only ever logged masked.
use async_trait::async_trait;
use log::debug;
#[cfg(test)]
use mockall::automock;
use serde::Deserialize;
use serde_json::{json, Value};
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use super::ProviderError;
use crate::utils::mask_url;

#[derive(Error, Debug)]
pub enum DasError {
    #[error("DAS request failed: {0}")]
    Http(#[from] ProviderError),

    #[error("DAS error (code {code}): {message}")]
    Rpc { code: i64, message: String },

    #[error("Invalid DAS response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
#[cfg_attr(test, automock)]
pub trait DasServiceTrait: Send + Sync {
    /// Assets held by `owner`, oldest first.
    async fn get_assets_by_owner(
        &self,
        owner: &Pubkey,
        page: u32,
        limit: u32,
    ) -> Result<Value, DasError>;
}

#[derive(Debug, Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcErrorObject>,
}

pub struct HeliusDasService {
    client: reqwest::Client,
    url: String,
}

impl HeliusDasService {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl DasServiceTrait for HeliusDasService {
    async fn get_assets_by_owner(
        &self,
        owner: &Pubkey,
        page: u32,
        limit: u32,
    ) -> Result<Value, DasError> {
        debug!("getAssetsByOwner {} via {}", owner, mask_url(&self.url));

        let request = json!({
            "jsonrpc": "2.0",
            "id": "solana-pay-relayer",
            "method": "getAssetsByOwner",
            "params": {
                "ownerAddress": owner.to_string(),
                "sortBy": { "sortBy": "created", "sortDirection": "asc" },
                "limit": limit,
                "page": page,
            }
        });

        let response: JsonRpcResponse = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(ProviderError::from)?
            .error_for_status()
            .map_err(ProviderError::from)?
            .json()
            .await
            .map_err(|e| DasError::InvalidResponse(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(DasError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response
            .result
            .ok_or_else(|| DasError::InvalidResponse("missing result".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn service(server: &mockito::ServerGuard) -> HeliusDasService {
        HeliusDasService::new(reqwest::Client::new(), format!("{}/?api-key=secret", server.url()))
    }

    #[actix_rt::test]
    async fn test_get_assets_by_owner_returns_result() {
        let mut server = mockito::Server::new_async().await;
        let owner = Pubkey::new_unique();
        let mock = server
            .mock("POST", "/")
            .match_query(Matcher::UrlEncoded("api-key".into(), "secret".into()))
            .match_body(Matcher::PartialJson(json!({
                "method": "getAssetsByOwner",
                "params": {
                    "ownerAddress": owner.to_string(),
                    "sortBy": {"sortBy": "created", "sortDirection": "asc"},
                    "limit": 5,
                    "page": 1
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"jsonrpc": "2.0", "id": "x", "result": {"total": 1, "items": [{"id": "asset"}]}})
                    .to_string(),
            )
            .create_async()
            .await;

        let result = service(&server)
            .get_assets_by_owner(&owner, 1, 5)
            .await
            .unwrap();

        assert_eq!(result["total"], 1);
        mock.assert_async().await;
    }

    #[actix_rt::test]
    async fn test_get_assets_by_owner_rpc_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", Matcher::Any)
            .with_status(200)
            .with_body(
                json!({"jsonrpc": "2.0", "id": "x", "error": {"code": -32000, "message": "bad owner"}})
                    .to_string(),
            )
            .create_async()
            .await;

        let err = service(&server)
            .get_assets_by_owner(&Pubkey::new_unique(), 1, 5)
            .await
            .unwrap_err();

        assert!(matches!(err, DasError::Rpc { code: -32000, .. }));
    }

    #[actix_rt::test]
    async fn test_get_assets_by_owner_http_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let err = service(&server)
            .get_assets_by_owner(&Pubkey::new_unique(), 1, 5)
            .await
            .unwrap_err();

        assert!(matches!(err, DasError::Http(ProviderError::RateLimited)));
    }
}
