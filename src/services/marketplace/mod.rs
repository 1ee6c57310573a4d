//! NFT marketplace integration.
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::{
    models::{FloorPriceFilter, ListingSnapshot, ProjectStat, ProviderPage, SortOrder},
    services::ProviderError,
};

mod hyperspace;
pub use hyperspace::*;

#[derive(Error, Debug)]
pub enum MarketplaceError {
    #[error("Marketplace request failed: {0}")]
    Http(#[from] ProviderError),

    #[error("Marketplace query error: {0}")]
    Query(String),

    #[error("Invalid marketplace response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
#[cfg_attr(test, automock)]
pub trait MarketplaceServiceTrait: Send + Sync {
    /// Serialized buy transaction for the lowest listing of `token`,
    /// with `buyer` as fee payer. The bytes are returned untouched.
    async fn create_buy_tx(
        &self,
        buyer: &Pubkey,
        token: &Pubkey,
        price: f64,
    ) -> Result<Vec<u8>, MarketplaceError>;

    /// One provider page of active listings for a collection.
    async fn get_listing_snapshots(
        &self,
        project_id: &str,
        page_number: u32,
        sort_order: SortOrder,
    ) -> Result<ProviderPage<ListingSnapshot>, MarketplaceError>;

    /// One provider page of collection statistics.
    async fn get_project_stats(
        &self,
        filter: FloorPriceFilter,
        page_number: u32,
        page_size: usize,
        sort_order: SortOrder,
    ) -> Result<ProviderPage<ProjectStat>, MarketplaceError>;
}
