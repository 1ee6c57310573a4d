use serde::Serialize;
use thiserror::Error;

mod solana;
pub use solana::*;

mod das;
pub use das::*;

/// Transport-level failures of the HTTP collaborators.
#[derive(Error, Debug, Serialize, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Request timeout")]
    Timeout,
    #[error("Rate limited (HTTP 429)")]
    RateLimited,
    #[error("Bad gateway (HTTP 502)")]
    BadGateway,
    #[error("Request error (HTTP {status_code}): {error}")]
    RequestError { error: String, status_code: u16 },
    #[error("Network configuration error: {0}")]
    NetworkConfiguration(String),
    #[error("Other provider error: {0}")]
    Other(String),
}

/// Categorizes a reqwest error into an appropriate `ProviderError` variant.
///
/// - Timeout errors become `ProviderError::Timeout`
/// - HTTP 429 responses become `ProviderError::RateLimited`
/// - HTTP 502 responses become `ProviderError::BadGateway`
/// - Other statuses become `ProviderError::RequestError`
/// - Everything else becomes `ProviderError::Other`
fn categorize_reqwest_error(err: &reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        return ProviderError::Timeout;
    }

    if let Some(status) = err.status() {
        return match status.as_u16() {
            429 => ProviderError::RateLimited,
            502 => ProviderError::BadGateway,
            code => ProviderError::RequestError {
                error: err.to_string(),
                status_code: code,
            },
        };
    }

    ProviderError::Other(err.to_string())
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        categorize_reqwest_error(&err)
    }
}

/// Builds the pooled HTTP client shared by the marketplace and DAS clients.
pub fn build_http_client(timeout_seconds: u64) -> Result<reqwest::Client, ProviderError> {
    use crate::constants::{
        DEFAULT_HTTP_CLIENT_CONNECT_TIMEOUT_SECONDS, DEFAULT_HTTP_CLIENT_POOL_MAX_IDLE_PER_HOST,
    };
    use std::time::Duration;

    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .connect_timeout(Duration::from_secs(
            DEFAULT_HTTP_CLIENT_CONNECT_TIMEOUT_SECONDS,
        ))
        .pool_max_idle_per_host(DEFAULT_HTTP_CLIENT_POOL_MAX_IDLE_PER_HOST)
        .build()
        .map_err(|e| ProviderError::NetworkConfiguration(format!("Failed to build HTTP client: {e}")))
}
