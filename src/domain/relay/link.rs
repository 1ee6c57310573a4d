//! Relay links: the URLs that carry an operation and its parameters
//! between the client, the preview page, the QR code and the wallet.
use std::str::FromStr;

use crate::{
    constants::SOLANA_PAY_SCHEME,
    models::{Operation, ParameterSet, RelayError},
};

/// Encodes parameters as an `application/x-www-form-urlencoded` query.
pub fn encode_params(params: &ParameterSet) -> Result<String, RelayError> {
    serde_urlencoded::to_string(params.pairs())
        .map_err(|e| RelayError::Validation(format!("Failed to encode parameters: {e}")))
}

/// Decodes a query string produced by [`encode_params`].
pub fn decode_params(query: &str) -> Result<ParameterSet, RelayError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
        .map_err(|e| RelayError::Validation(format!("Malformed query string: {e}")))?;
    ParameterSet::from_pairs(pairs)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayStage {
    /// Link preview page shown in chat
    Page,
    /// QR image embedded in the preview
    Qr,
    /// Transaction request endpoint the wallet talks to
    Sign,
}

impl RelayStage {
    pub fn path_segment(&self) -> &'static str {
        match self {
            RelayStage::Page => "page",
            RelayStage::Qr => "qr",
            RelayStage::Sign => "sign",
        }
    }
}

/// An operation together with the parameters the client supplied for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayLink {
    operation: Operation,
    params: ParameterSet,
}

impl RelayLink {
    pub fn new(operation: Operation, params: ParameterSet) -> Self {
        Self { operation, params }
    }

    /// Rebuilds a link from an inbound request path segment and query.
    pub fn parse(operation_name: &str, query: &str) -> Result<Self, RelayError> {
        let operation = Operation::from_str(operation_name)
            .map_err(|_| RelayError::UnknownOperation(operation_name.to_string()))?;
        Ok(Self::new(operation, decode_params(query)?))
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn url(&self, base_url: &str, stage: RelayStage) -> Result<String, RelayError> {
        let path = format!("{}/{}/{}", base_url, stage.path_segment(), self.operation);
        let query = encode_params(&self.params)?;
        if query.is_empty() {
            Ok(path)
        } else {
            Ok(format!("{path}?{query}"))
        }
    }

    /// `solana:` URL a wallet resolves into a transaction request.
    pub fn wallet_url(&self, base_url: &str) -> Result<String, RelayError> {
        let sign_url = self.url(base_url, RelayStage::Sign)?;
        Ok(format!(
            "{}:{}",
            SOLANA_PAY_SCHEME,
            urlencoding::encode(&sign_url)
        ))
    }
}
