use thiserror::Error;

use crate::services::{DasError, IdlError, MarketplaceError, QrError, SolanaProviderError};

/// Failures raised while serving a relay stage or a read method.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Invalid method name {0}")]
    UnknownOperation(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Metadata payload is {size} bytes, limit is {limit}")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("Chain unavailable: {0}")]
    ChainUnavailable(String),

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Rendering failed: {0}")]
    Rendering(String),
}

impl From<SolanaProviderError> for RelayError {
    fn from(error: SolanaProviderError) -> Self {
        RelayError::ChainUnavailable(error.to_string())
    }
}

impl From<MarketplaceError> for RelayError {
    fn from(error: MarketplaceError) -> Self {
        RelayError::ProviderUnavailable(error.to_string())
    }
}

impl From<DasError> for RelayError {
    fn from(error: DasError) -> Self {
        RelayError::ProviderUnavailable(error.to_string())
    }
}

impl From<IdlError> for RelayError {
    fn from(error: IdlError) -> Self {
        RelayError::Validation(error.to_string())
    }
}

impl From<QrError> for RelayError {
    fn from(error: QrError) -> Self {
        RelayError::Rendering(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_errors_map_to_chain_unavailable() {
        for error in [
            SolanaProviderError::NetworkError("refused".into()),
            SolanaProviderError::RpcError("node is behind".into()),
            SolanaProviderError::InvalidResponse("missing value".into()),
        ] {
            let mapped: RelayError = error.into();
            assert!(matches!(mapped, RelayError::ChainUnavailable(_)));
        }
    }

    #[test]
    fn test_qr_error_maps_to_rendering() {
        let error: RelayError = QrError::Encode("data too long".into()).into();
        assert!(matches!(error, RelayError::Rendering(_)));
    }

    #[test]
    fn test_idl_error_maps_to_validation() {
        let error: RelayError = IdlError::Truncated.into();
        assert!(matches!(error, RelayError::Validation(msg) if msg.contains("truncated")));
    }
}
