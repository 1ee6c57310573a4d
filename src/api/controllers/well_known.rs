//! Serves the plugin manifest files from the configured directory.

use std::{io::ErrorKind, path::Path};

use actix_web::{web, HttpResponse};
use log::error;

use crate::models::{ApiError, AppState};

/// Only bare file names are served; anything that could walk the tree is
/// treated as missing.
fn is_plain_file_name(file: &str) -> bool {
    !file.is_empty()
        && !file.starts_with('.')
        && !file.contains(['/', '\\'])
        && !file.contains("..")
}

fn content_type_for(file: &str) -> &'static str {
    match Path::new(file).extension().and_then(|ext| ext.to_str()) {
        Some("json") => "application/json",
        Some("yaml") | Some("yml") => "text/yaml",
        Some("png") => "image/png",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

pub async fn serve_file(
    file: &str,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    if !is_plain_file_name(file) {
        return Ok(HttpResponse::NotFound().finish());
    }

    let path = Path::new(&state.config.well_known_dir).join(file);
    match tokio::fs::read(&path).await {
        Ok(contents) => Ok(HttpResponse::Ok()
            .content_type(content_type_for(file))
            .body(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(HttpResponse::NotFound().finish()),
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            Err(ApiError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_plain_file_name() {
        assert!(is_plain_file_name("ai-plugin.json"));
        assert!(is_plain_file_name("openapi.yaml"));
        assert!(!is_plain_file_name("../Cargo.toml"));
        assert!(!is_plain_file_name(".env"));
        assert!(!is_plain_file_name("a/b.json"));
        assert!(!is_plain_file_name(""));
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("ai-plugin.json"), "application/json");
        assert_eq!(content_type_for("openapi.yaml"), "text/yaml");
        assert_eq!(content_type_for("logo.png"), "image/png");
        assert_eq!(content_type_for("blob"), "application/octet-stream");
    }
}
