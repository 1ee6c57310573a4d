//! # Dispatch Controller
//!
//! Entry points for registry names posted by the client: relay operations
//! answer with a link to sign, read methods with provider data.

use actix_web::{web, HttpResponse};
use log::info;

use super::json_body;
use crate::models::{ApiError, AppState, Operation, ParameterSet, ReadMethod};

/// Stage 0: returns the preview link for `operation`.
pub async fn issue_link(
    operation: Operation,
    body: web::Bytes,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let params = ParameterSet::from_json(&json_body(&body)?)?;
    let response = state.relay_service.issue_link(operation, params)?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn execute_read(
    method: ReadMethod,
    body: web::Bytes,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let request = json_body(&body)?;
    let response = state.read_service.execute(method, &request).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Any name outside the registry.
pub async fn unknown_method(method_name: String) -> Result<HttpResponse, ApiError> {
    info!("Rejected unknown method {method_name}");
    Err(ApiError::UnknownOperation(method_name))
}
