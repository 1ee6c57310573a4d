//! Normalized marketplace records.
//!
//! Provider responses are decoded into these once, at the client boundary,
//! so that the read handlers never deal with partially populated payloads.

/// A page of provider results plus the provider's own continuation flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderPage<T> {
    pub items: Vec<T>,
    pub has_next_page: bool,
}

/// The lowest active listing of a single token.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSnapshot {
    pub token_address: String,
    pub price: f64,
    pub marketplace_program_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectStat {
    pub project_id: String,
    pub display_name: Option<String>,
    pub img_url: Option<String>,
    pub website: Option<String>,
    pub floor_price: Option<f64>,
}

/// Inclusive floor-price bounds, in SOL.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FloorPriceFilter {
    pub min: Option<f64>,
    pub max: Option<f64>,
}
