//! Initialization routines for the relay.
//!
//! # Submodules
//!
//! - `initialize_app_state`: Builds the provider clients and domain services
mod initialize_app_state;
pub use initialize_app_state::*;
