//! Read-only methods: chain lookups and marketplace browsing.
use std::{str::FromStr, sync::Arc};

use log::debug;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use solana_sdk::{native_token::LAMPORTS_PER_SOL, pubkey::Pubkey, signature::Signature};

use crate::{
    constants::{DAS_ASSETS_LIMIT, DEFAULT_PAGE_NUMBER, MAGIC_EDEN_PROGRAM_ID, SIGNATURES_PAGE_LIMIT},
    models::{
        AddressRequest, BalanceResponse, CollectionResponseItem, CollectionsByFloorPriceRequest,
        CollectionsResponse, FloorPriceFilter, ListedCollectionNftsRequest, ListingResponseItem,
        ListingsResponse, MessageResponse, NextSignaturePage, ProviderPage, ReadMethod,
        RelayError, SignaturesForAddressRequest, SignaturesPageResponse, TransactionRequest,
    },
    services::{
        encoded_account_data, idl_address, AnchorIdl, DasServiceTrait, MarketplaceServiceTrait,
        SolanaProviderTrait,
    },
};

mod pager;
pub use pager::*;

pub struct ReadService {
    provider: Arc<dyn SolanaProviderTrait>,
    das: Arc<dyn DasServiceTrait>,
    marketplace: Arc<dyn MarketplaceServiceTrait>,
}

fn parse_request<T: DeserializeOwned>(method: ReadMethod, body: &Value) -> Result<T, RelayError> {
    let body = if body.is_null() { json!({}) } else { body.clone() };
    serde_json::from_value(body)
        .map_err(|e| RelayError::Validation(format!("Invalid {method} request: {e}")))
}

fn parse_address(address: &str) -> Result<Pubkey, RelayError> {
    Pubkey::from_str(address)
        .map_err(|e| RelayError::Validation(format!("Invalid address {address}: {e}")))
}

fn to_json<T: Serialize>(response: &T) -> Result<Value, RelayError> {
    serde_json::to_value(response)
        .map_err(|e| RelayError::Validation(format!("Failed to serialize response: {e}")))
}

fn to_json_string(value: &impl Serialize) -> Result<String, RelayError> {
    serde_json::to_string(value)
        .map_err(|e| RelayError::Validation(format!("Failed to serialize response: {e}")))
}

/// Collection ids that are plain base58 strings are mint-style addresses
/// rather than readable slugs.
fn is_human_readable_id(id: &str) -> bool {
    bs58::decode(id).into_vec().is_err()
}

impl ReadService {
    pub fn new(
        provider: Arc<dyn SolanaProviderTrait>,
        das: Arc<dyn DasServiceTrait>,
        marketplace: Arc<dyn MarketplaceServiceTrait>,
    ) -> Self {
        Self {
            provider,
            das,
            marketplace,
        }
    }

    pub async fn execute(&self, method: ReadMethod, body: &Value) -> Result<Value, RelayError> {
        debug!("Executing read method {method}");
        match method {
            ReadMethod::GetBalance => self.get_balance(parse_request(method, body)?).await,
            ReadMethod::GetAccountInfo => self.get_account_info(parse_request(method, body)?).await,
            ReadMethod::GetSignaturesForAddress => {
                self.get_signatures_for_address(parse_request(method, body)?)
                    .await
            }
            ReadMethod::GetTransaction => self.get_transaction(parse_request(method, body)?).await,
            ReadMethod::GetAssetsByOwner => {
                self.get_assets_by_owner(parse_request(method, body)?).await
            }
            ReadMethod::GetListedCollectionNfts => {
                self.get_listed_collection_nfts(parse_request(method, body)?)
                    .await
            }
            ReadMethod::GetCollectionsByFloorPrice => {
                self.get_collections_by_floor_price(parse_request(method, body)?)
                    .await
            }
        }
    }

    async fn get_balance(&self, request: AddressRequest) -> Result<Value, RelayError> {
        let address = parse_address(&request.address)?;
        let lamports = self.provider.get_balance(&address).await?;
        to_json(&BalanceResponse {
            sol: lamports as f64 / LAMPORTS_PER_SOL as f64,
        })
    }

    async fn get_account_info(&self, request: AddressRequest) -> Result<Value, RelayError> {
        let address = parse_address(&request.address)?;
        let Some(mut info) = self.provider.get_account_info(&address).await? else {
            return to_json(&MessageResponse {
                message: "{}".to_string(),
            });
        };

        match self.decode_anchor_account(&info).await {
            Ok(Some(decoded)) => {
                let extended = to_json_string(&decoded)?;
                if let Some(object) = info.as_object_mut() {
                    object.insert("extended".to_string(), Value::String(extended));
                }
            }
            Ok(None) => {}
            Err(e) => debug!("Account {address} not decoded with an Anchor IDL: {e}"),
        }

        to_json(&MessageResponse {
            message: to_json_string(&info)?,
        })
    }

    /// Decodes a program-owned account with the IDL its owner published, if any.
    async fn decode_anchor_account(&self, info: &Value) -> Result<Option<Value>, RelayError> {
        if info.get("executable").and_then(Value::as_bool) == Some(true) {
            return Ok(None);
        }
        let (Some(owner), Some(data)) = (
            info.get("owner").and_then(Value::as_str),
            encoded_account_data(info),
        ) else {
            return Ok(None);
        };

        let idl_address = idl_address(&parse_address(owner)?)?;
        let Some(idl_account) = self.provider.get_account_info(&idl_address).await? else {
            return Ok(None);
        };
        let Some(idl_data) = encoded_account_data(&idl_account) else {
            return Ok(None);
        };

        Ok(AnchorIdl::from_idl_account(&idl_data)?.decode_account(&data)?)
    }

    async fn get_signatures_for_address(
        &self,
        request: SignaturesForAddressRequest,
    ) -> Result<Value, RelayError> {
        let address = parse_address(&request.address)?;
        let signatures = self
            .provider
            .get_signatures_for_address(
                &address,
                request.before_signature,
                request.until_signature,
                SIGNATURES_PAGE_LIMIT,
            )
            .await?;

        let has_more = signatures.len() == SIGNATURES_PAGE_LIMIT;
        let next_page = if has_more {
            signatures.last().map(|record| NextSignaturePage {
                before_signature: record.signature.clone(),
            })
        } else {
            None
        };

        to_json(&SignaturesPageResponse {
            has_more,
            next_page,
            signatures: to_json_string(&signatures)?,
        })
    }

    async fn get_transaction(&self, request: TransactionRequest) -> Result<Value, RelayError> {
        let signature = Signature::from_str(&request.signature).map_err(|e| {
            RelayError::Validation(format!("Invalid signature {}: {e}", request.signature))
        })?;
        Ok(self.provider.get_transaction(&signature).await?)
    }

    async fn get_assets_by_owner(&self, request: AddressRequest) -> Result<Value, RelayError> {
        let owner = parse_address(&request.address)?;
        let assets = self
            .das
            .get_assets_by_owner(&owner, DEFAULT_PAGE_NUMBER, DAS_ASSETS_LIMIT)
            .await?;
        to_json(&MessageResponse {
            message: to_json_string(&assets)?,
        })
    }

    async fn get_listed_collection_nfts(
        &self,
        request: ListedCollectionNftsRequest,
    ) -> Result<Value, RelayError> {
        let marketplace = self.marketplace.as_ref();
        let project_id = request.project_id.as_str();
        let sort_order = request.price_order;

        let filled = fill_page(request.page_number, request.page_size, |page_number| async move {
            let page = marketplace
                .get_listing_snapshots(project_id, page_number, sort_order)
                .await?;
            Ok::<_, RelayError>(ProviderPage {
                items: page
                    .items
                    .into_iter()
                    .filter(|listing| listing.marketplace_program_id != MAGIC_EDEN_PROGRAM_ID)
                    .collect(),
                has_next_page: page.has_next_page,
            })
        })
        .await?;

        let mut listings: Vec<ListingResponseItem> = filled
            .items
            .into_iter()
            .map(|listing| ListingResponseItem {
                price: listing.price,
                token: listing.token_address,
                marketplace: listing.marketplace_program_id,
            })
            .collect();
        listings.sort_by(|a, b| a.price.total_cmp(&b.price));

        to_json(&ListingsResponse {
            listings,
            current_page: filled.current_page,
            has_more: filled.has_more,
        })
    }

    async fn get_collections_by_floor_price(
        &self,
        request: CollectionsByFloorPriceRequest,
    ) -> Result<Value, RelayError> {
        let marketplace = self.marketplace.as_ref();
        let filter = FloorPriceFilter {
            min: request.min_floor_price,
            max: request.max_floor_price,
        };
        let page_size = request.page_size;
        let sort_order = request.order_by;
        let human_readable = request.human_readable;

        let filled = fill_page(request.page_number, page_size, |page_number| async move {
            let page = marketplace
                .get_project_stats(filter, page_number, page_size, sort_order)
                .await?;
            Ok::<_, RelayError>(ProviderPage {
                items: page
                    .items
                    .into_iter()
                    .filter(|stat| !human_readable || is_human_readable_id(&stat.project_id))
                    .collect(),
                has_next_page: page.has_next_page,
            })
        })
        .await?;

        let projects = filled
            .items
            .into_iter()
            .map(|stat| CollectionResponseItem {
                id: stat.project_id,
                desc: stat.display_name,
                img: stat.img_url,
                website: stat.website,
                floor_price: stat.floor_price,
            })
            .collect();

        to_json(&CollectionsResponse {
            projects,
            has_more: filled.has_more,
            current_page: filled.current_page,
        })
    }
}
