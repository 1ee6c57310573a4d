//! Static files the LLM host fetches to discover the plugin.
use actix_web::{get, web, Responder};

use crate::{api::controllers::well_known, models::AppState};

#[get("/.well-known/{file}")]
async fn well_known_file(file: web::Path<String>, data: web::ThinData<AppState>) -> impl Responder {
    well_known::serve_file(&file, data).await
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(well_known_file);
}
