//! # Relay Controller
//!
//! Stages reached through an issued link. Each handler rebuilds the link
//! from the request path and query, so an unknown operation is rejected at
//! every stage.

use actix_web::{http::header::ContentType, web, HttpResponse};

use super::json_body;
use crate::{
    domain::RelayLink,
    models::{ApiError, AppState, Operation, RelayError, WalletAccountRequest},
};
use std::str::FromStr;

/// Stage 1: HTML page whose preview image is the QR code.
pub async fn preview_page(
    operation: &str,
    query: &str,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let link = RelayLink::parse(operation, query)?;
    let html = state.relay_service.preview_page(&link)?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
}

/// Stage 2: PNG of the wallet URL.
pub async fn qr_image(
    operation: &str,
    query: &str,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let link = RelayLink::parse(operation, query)?;
    let png = state.relay_service.qr_code(&link).await?;
    Ok(HttpResponse::Ok().content_type(ContentType::png()).body(png))
}

/// Stage 3, first wallet request: label and icon.
pub async fn sign_request_metadata(
    operation: &str,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    Operation::from_str(operation)
        .map_err(|_| ApiError::UnknownOperation(operation.to_string()))?;
    Ok(HttpResponse::Ok().json(state.relay_service.sign_request_metadata()))
}

/// Stage 3, second wallet request: the unsigned transaction.
pub async fn sign_transaction(
    operation: &str,
    query: &str,
    body: web::Bytes,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let link = RelayLink::parse(operation, query)?;
    let wallet: WalletAccountRequest = match json_body(&body)? {
        serde_json::Value::Null => WalletAccountRequest::default(),
        value => serde_json::from_value(value).map_err(|e| {
            RelayError::Validation(format!("Invalid wallet request: {e}"))
        })?,
    };

    let envelope = state
        .relay_service
        .build_transaction(&link, wallet.account.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(envelope))
}
