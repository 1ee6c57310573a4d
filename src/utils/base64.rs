//! Standard-alphabet base64 used for transaction wire bytes.
use base64::{engine::general_purpose::STANDARD, Engine};

pub fn base64_encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn base64_decode(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(data)
}
