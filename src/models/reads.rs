//! Request and response bodies for the read-only methods.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::constants::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};

fn default_page_number() -> u32 {
    DEFAULT_PAGE_NUMBER
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Sort direction accepted by the marketplace provider.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum SortOrder {
    #[strum(serialize = "ASC")]
    #[serde(rename = "ASC", alias = "asc")]
    Asc,
    #[default]
    #[strum(serialize = "DESC")]
    #[serde(rename = "DESC", alias = "desc")]
    Desc,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressRequest {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignaturesForAddressRequest {
    pub address: String,
    #[serde(default)]
    pub before_signature: Option<String>,
    #[serde(default)]
    pub until_signature: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRequest {
    pub signature: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedCollectionNftsRequest {
    pub project_id: String,
    #[serde(default = "default_page_number")]
    pub page_number: u32,
    #[serde(default)]
    pub price_order: SortOrder,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionsByFloorPriceRequest {
    #[serde(default)]
    pub max_floor_price: Option<f64>,
    #[serde(default)]
    pub min_floor_price: Option<f64>,
    #[serde(default)]
    pub order_by: SortOrder,
    #[serde(default = "default_page_number")]
    pub page_number: u32,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub human_readable: bool,
}

/// One entry of `getSignaturesForAddress`.
///
/// `signature` and `slot` are always present; the rest depends on the
/// node and on whether the transaction failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRecord {
    pub signature: String,
    pub slot: u64,
    #[serde(default)]
    pub err: Option<Value>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub block_time: Option<i64>,
    #[serde(default)]
    pub confirmation_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub sol: f64,
}

/// Wraps a provider payload that is returned to the client as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextSignaturePage {
    pub before_signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignaturesPageResponse {
    pub has_more: bool,
    pub next_page: Option<NextSignaturePage>,
    pub signatures: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingResponseItem {
    pub price: f64,
    pub token: String,
    pub marketplace: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsResponse {
    pub listings: Vec<ListingResponseItem>,
    pub current_page: u32,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionResponseItem {
    pub id: String,
    pub desc: Option<String>,
    pub img: Option<String>,
    pub website: Option<String>,
    pub floor_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionsResponse {
    pub projects: Vec<CollectionResponseItem>,
    pub has_more: bool,
    pub current_page: u32,
}
