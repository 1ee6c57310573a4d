//! # API Controllers Module
//!
//! ## Controllers
//!
//! * `dispatch` - Operation and read-method entry points
//! * `relay` - Preview page, QR image and wallet endpoints
//! * `well_known` - Static plugin manifest files

use actix_web::web;
use serde_json::Value;

use crate::models::RelayError;

pub mod dispatch;
pub mod relay;
pub mod well_known;

/// Parses an optional JSON request body; an empty body is `Value::Null`.
fn json_body(body: &web::Bytes) -> Result<Value, RelayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|e| RelayError::Validation(format!("Malformed JSON body: {e}")))
}
