use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;
use serde_json::json;
use thiserror::Error;

use crate::{constants::GENERIC_ERROR_MESSAGE, models::RelayError};

/// The only error type returned by HTTP handlers.
///
/// Unknown names are the single failure reported with detail; every other
/// failure collapses to the generic body after being logged.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid method name {0}")]
    UnknownOperation(String),

    #[error("An error occurred")]
    Internal,
}

impl From<RelayError> for ApiError {
    fn from(error: RelayError) -> Self {
        match error {
            RelayError::UnknownOperation(name) => ApiError::UnknownOperation(name),
            other => {
                error!("Request failed: {other}");
                ApiError::Internal
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UnknownOperation(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::UnknownOperation(_) => {
                HttpResponse::NotFound().json(json!({ "error": self.to_string() }))
            }
            ApiError::Internal => HttpResponse::InternalServerError()
                .json(json!({ "message": GENERIC_ERROR_MESSAGE })),
        }
    }
}
