//! Solana Pay relay for an LLM plugin.
//!
//! Issues sign links for unsigned transactions, serves the link preview page
//! and QR code, answers the Solana Pay wallet handshake, and passes read-only
//! queries through to chain and marketplace providers.
pub mod api;
pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod domain;
pub mod logging;
pub mod models;
pub mod services;
pub mod utils;
