//! Response bodies exchanged with the client and the wallet during a relay.
use serde::{Deserialize, Serialize};

use crate::constants::SOLANA_PAY_NETWORK;

/// Stage 0 response: the link the user opens to start signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkToSignResponse {
    #[serde(rename = "linkToSign")]
    pub link_to_sign: String,
}

/// Returned to the wallet when it first resolves the transaction request URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignRequestMetadata {
    pub label: String,
    pub icon: String,
}

/// Body the wallet posts to fetch the transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccountRequest {
    #[serde(default)]
    pub account: Option<String>,
}

/// Unsigned transaction handed to the wallet.
///
/// `transaction` is the base64 wire encoding; the signature slot of the
/// fee payer is left empty for the wallet to fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedTransactionEnvelope {
    pub network: String,
    pub transaction: String,
    pub message: String,
}

impl UnsignedTransactionEnvelope {
    pub fn new(transaction: String, message: impl Into<String>) -> Self {
        Self {
            network: SOLANA_PAY_NETWORK.to_string(),
            transaction,
            message: message.into(),
        }
    }
}
