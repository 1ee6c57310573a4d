//! # Services Module
//!
//! External collaborators: the Solana RPC node, the DAS indexer, the NFT
//! marketplace API and the QR renderer.

mod provider;
pub use provider::*;

mod marketplace;
pub use marketplace::*;

mod qr;
pub use qr::*;
