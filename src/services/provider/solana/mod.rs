//! Solana Provider Module
//!
//! Thin abstraction over the non-blocking Solana `RpcClient`. The relay only
//! reads from the chain: balances, the latest blockhash, account data,
//! signature history and confirmed transactions. Nothing is ever submitted.
//!
//! Calls are made once; a failed call surfaces as a `SolanaProviderError`
//! and is reported to the caller as an unavailable chain.
use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Url;
use serde::Serialize;
use serde_json::{json, Map, Value};
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
    rpc_request::RpcRequest,
};
use solana_sdk::{commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey, signature::Signature};
use thiserror::Error;

use crate::{constants::MAX_SUPPORTED_TRANSACTION_VERSION, models::SignatureRecord};

mod idl;
pub use idl::*;

/// Errors that can occur when talking to the Solana RPC node.
#[derive(Error, Debug, Serialize)]
pub enum SolanaProviderError {
    /// Connection refused, DNS failure, timeout
    #[error("Network error: {0}")]
    NetworkError(String),

    /// JSON-RPC error object returned by the node
    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Request error (HTTP {status_code}): {error}")]
    RequestError { error: String, status_code: u16 },

    /// Response did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network configuration error: {0}")]
    NetworkConfiguration(String),
}

impl SolanaProviderError {
    pub fn from_rpc_error(error: ClientError) -> Self {
        match error.kind() {
            ClientErrorKind::Io(_) => SolanaProviderError::NetworkError(error.to_string()),
            ClientErrorKind::Reqwest(reqwest_err) => match reqwest_err.status() {
                Some(status) => SolanaProviderError::RequestError {
                    error: error.to_string(),
                    status_code: status.as_u16(),
                },
                None => SolanaProviderError::NetworkError(error.to_string()),
            },
            ClientErrorKind::SerdeJson(_) => {
                SolanaProviderError::InvalidResponse(error.to_string())
            }
            _ => SolanaProviderError::RpcError(error.to_string()),
        }
    }
}

#[async_trait]
#[cfg_attr(test, automock)]
pub trait SolanaProviderTrait: Send + Sync {
    /// Balance in lamports.
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, SolanaProviderError>;

    async fn get_latest_blockhash(&self) -> Result<Hash, SolanaProviderError>;

    /// Parsed account data, or `None` when the account does not exist.
    async fn get_account_info(&self, address: &Pubkey)
        -> Result<Option<Value>, SolanaProviderError>;

    /// Signatures involving `address`, newest first.
    async fn get_signatures_for_address(
        &self,
        address: &Pubkey,
        before: Option<String>,
        until: Option<String>,
        limit: usize,
    ) -> Result<Vec<SignatureRecord>, SolanaProviderError>;

    /// Confirmed transaction as returned by the node; `Value::Null` when unknown.
    async fn get_transaction(&self, signature: &Signature) -> Result<Value, SolanaProviderError>;
}

pub struct SolanaProvider {
    client: RpcClient,
}

impl SolanaProvider {
    pub fn new(rpc_url: &str, timeout_seconds: u64) -> Result<Self, SolanaProviderError> {
        let url: Url = rpc_url.parse().map_err(|e| {
            SolanaProviderError::NetworkConfiguration(format!("Invalid URL format: {e}"))
        })?;

        let client = RpcClient::new_with_timeout_and_commitment(
            url.to_string(),
            Duration::from_secs(timeout_seconds),
            CommitmentConfig::confirmed(),
        );

        Ok(Self { client })
    }
}

#[async_trait]
impl SolanaProviderTrait for SolanaProvider {
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, SolanaProviderError> {
        self.client
            .get_balance(address)
            .await
            .map_err(SolanaProviderError::from_rpc_error)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, SolanaProviderError> {
        self.client
            .get_latest_blockhash()
            .await
            .map_err(SolanaProviderError::from_rpc_error)
    }

    async fn get_account_info(
        &self,
        address: &Pubkey,
    ) -> Result<Option<Value>, SolanaProviderError> {
        let response: Value = self
            .client
            .send(
                RpcRequest::GetAccountInfo,
                json!([address.to_string(), { "encoding": "jsonParsed" }]),
            )
            .await
            .map_err(SolanaProviderError::from_rpc_error)?;

        match response.get("value") {
            Some(Value::Null) | None => Ok(None),
            Some(value) => Ok(Some(value.clone())),
        }
    }

    async fn get_signatures_for_address(
        &self,
        address: &Pubkey,
        before: Option<String>,
        until: Option<String>,
        limit: usize,
    ) -> Result<Vec<SignatureRecord>, SolanaProviderError> {
        let mut config = Map::new();
        config.insert("limit".into(), json!(limit));
        if let Some(before) = before {
            config.insert("before".into(), Value::String(before));
        }
        if let Some(until) = until {
            config.insert("until".into(), Value::String(until));
        }

        self.client
            .send(
                RpcRequest::GetSignaturesForAddress,
                json!([address.to_string(), config]),
            )
            .await
            .map_err(SolanaProviderError::from_rpc_error)
    }

    async fn get_transaction(&self, signature: &Signature) -> Result<Value, SolanaProviderError> {
        self.client
            .send(
                RpcRequest::GetTransaction,
                json!([
                    signature.to_string(),
                    {
                        "encoding": "json",
                        "maxSupportedTransactionVersion": MAX_SUPPORTED_TRANSACTION_VERSION
                    }
                ]),
            )
            .await
            .map_err(SolanaProviderError::from_rpc_error)
    }
}
