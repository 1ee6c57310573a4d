//! Process-wide constants for the relay service.
mod server;
pub use server::*;

mod logging;
pub use logging::*;

mod http_client;
pub use http_client::*;

mod solana_pay;
pub use solana_pay::*;

mod metadata_program;
pub use metadata_program::*;

mod marketplace;
pub use marketplace::*;

mod anchor;
pub use anchor::*;
