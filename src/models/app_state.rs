use std::sync::Arc;

use crate::{
    config::ServerConfig,
    domain::{ReadService, RelayService},
};

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub relay_service: Arc<RelayService>,
    pub read_service: Arc<ReadService>,
}
