//! Process configuration, built once at startup and injected everywhere.
mod server_config;
pub use server_config::*;
