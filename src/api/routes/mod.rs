//! # API Routes Module
//!
//! ## Routes
//!
//! * `/health` - Health check
//! * `/.well-known/{file}` - Plugin manifest files
//! * `/page/{operation}`, `/qr/{operation}`, `/sign/{operation}` - Relay stages
//! * `/{name}` - Registry operations and read methods

pub mod dispatch;
pub mod health;
pub mod relay;
pub mod well_known;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::init)
        .configure(well_known::init)
        .configure(relay::init)
        .configure(dispatch::init);
}
