//! Routes for the relay stages reached through an issued link.
use actix_web::{get, post, web, HttpRequest, Responder};

use crate::{api::controllers::relay, models::AppState};

/// Link-preview page.
#[get("/page/{operation}")]
async fn preview_page(
    operation: web::Path<String>,
    req: HttpRequest,
    data: web::ThinData<AppState>,
) -> impl Responder {
    relay::preview_page(&operation, req.query_string(), data).await
}

/// QR code PNG embedded in the preview page.
#[get("/qr/{operation}")]
async fn qr_image(
    operation: web::Path<String>,
    req: HttpRequest,
    data: web::ThinData<AppState>,
) -> impl Responder {
    relay::qr_image(&operation, req.query_string(), data).await
}

/// Transaction request metadata for the wallet.
#[get("/sign/{operation}")]
async fn sign_request_metadata(
    operation: web::Path<String>,
    data: web::ThinData<AppState>,
) -> impl Responder {
    relay::sign_request_metadata(&operation, data).await
}

/// Unsigned transaction for the wallet to sign.
#[post("/sign/{operation}")]
async fn sign_transaction(
    operation: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
    data: web::ThinData<AppState>,
) -> impl Responder {
    relay::sign_transaction(&operation, req.query_string(), body, data).await
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(preview_page);
    cfg.service(qr_image);
    cfg.service(sign_request_metadata);
    cfg.service(sign_transaction);
}
