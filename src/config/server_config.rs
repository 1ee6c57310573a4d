//! Server configuration read from the process environment.
use std::{env, str::FromStr};

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::constants::{
    DEFAULT_HELIUS_RPC_URL, DEFAULT_HOST, DEFAULT_HYPERSPACE_API_URL, DEFAULT_PORT,
    DEFAULT_RPC_TIMEOUT_SECONDS, DEFAULT_SELF_URL, DEFAULT_SOLANA_PAY_LABEL,
    DEFAULT_SOLANA_RPC_URL, DEFAULT_WELL_KNOWN_DIR, DEV_WELL_KNOWN_DIR,
};

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub dev: bool,
    /// Public base URL every relay link is built from, without trailing slash.
    pub self_url: String,
    pub solana_rpc_url: String,
    /// Full DAS endpoint, API key included.
    pub helius_rpc_url: String,
    pub hyperspace_api_url: String,
    pub hyperspace_api_key: String,
    pub metadata_program_id: Pubkey,
    pub rpc_timeout_seconds: u64,
    pub solana_pay_label: String,
    pub well_known_dir: String,
}

fn required(name: &str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name.to_string())),
    }
}

fn parse_or<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name: name.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = parse_or("PORT", DEFAULT_PORT)?;
        let dev = env::var("DEV").map(|v| v == "true").unwrap_or(false);

        let self_url = match env::var("SELF_URL") {
            Ok(url) => url,
            Err(_) if dev => format!("http://localhost:{port}"),
            Err(_) => DEFAULT_SELF_URL.to_string(),
        };

        let helius_api_key = required("HELIUS_API_KEY")?;
        let metadata_program = required("ON_CHAIN_METADATA_PROGRAM")?;
        let metadata_program_id =
            Pubkey::from_str(&metadata_program).map_err(|e| ConfigError::InvalidValue {
                name: "ON_CHAIN_METADATA_PROGRAM".to_string(),
                reason: e.to_string(),
            })?;

        let default_well_known = if dev {
            DEV_WELL_KNOWN_DIR
        } else {
            DEFAULT_WELL_KNOWN_DIR
        };

        Ok(Self {
            host,
            port,
            dev,
            self_url: self_url.trim_end_matches('/').to_string(),
            solana_rpc_url: env::var("SOLANA_RPC_URL")
                .unwrap_or_else(|_| DEFAULT_SOLANA_RPC_URL.to_string()),
            helius_rpc_url: format!("{DEFAULT_HELIUS_RPC_URL}/?api-key={helius_api_key}"),
            hyperspace_api_url: env::var("HYPERSPACE_API_URL")
                .unwrap_or_else(|_| DEFAULT_HYPERSPACE_API_URL.to_string()),
            hyperspace_api_key: required("HYPERSPACE_API_KEY")?,
            metadata_program_id,
            rpc_timeout_seconds: parse_or("RPC_TIMEOUT_SECONDS", DEFAULT_RPC_TIMEOUT_SECONDS)?,
            solana_pay_label: env::var("SOLANA_PAY_LABEL")
                .unwrap_or_else(|_| DEFAULT_SOLANA_PAY_LABEL.to_string()),
            well_known_dir: env::var("WELL_KNOWN_DIR")
                .unwrap_or_else(|_| default_well_known.to_string()),
        })
    }
}
