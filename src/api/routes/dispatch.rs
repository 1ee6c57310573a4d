//! One route per registry name, plus a catch-all that reports unknown names.
use actix_web::{web, Responder};
use strum::IntoEnumIterator;

use crate::{
    api::controllers::dispatch,
    models::{AppState, Operation, ReadMethod},
};

async fn unknown_method(method_name: web::Path<String>) -> impl Responder {
    dispatch::unknown_method(method_name.into_inner()).await
}

pub fn init(cfg: &mut web::ServiceConfig) {
    for operation in Operation::iter() {
        cfg.route(
            &format!("/{operation}"),
            web::post().to(
                move |body: web::Bytes, data: web::ThinData<AppState>| {
                    dispatch::issue_link(operation, body, data)
                },
            ),
        );
    }

    for method in ReadMethod::iter() {
        cfg.route(
            &format!("/{method}"),
            web::post().to(move |body: web::Bytes, data: web::ThinData<AppState>| {
                dispatch::execute_read(method, body, data)
            }),
        );
    }

    // Registered last so that registry names match first
    cfg.route("/{method_name}", web::post().to(unknown_method));
}
