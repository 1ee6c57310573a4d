//! Hyperspace GraphQL client.
//!
//! Responses are decoded into private wire structs and normalized into the
//! `models` marketplace records here. Snapshots without an active listing
//! are dropped at this boundary.
use async_trait::async_trait;
use log::debug;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use solana_sdk::pubkey::Pubkey;

use super::{MarketplaceError, MarketplaceServiceTrait};
use crate::{
    constants::{BUYER_BROKER, BUYER_BROKER_BASIS_POINTS},
    models::{FloorPriceFilter, ListingSnapshot, ProjectStat, ProviderPage, SortOrder},
    services::ProviderError,
    utils::mask_url,
};

const CREATE_BUY_TX_QUERY: &str = r#"
query CreateBuyTx($buyerAddress: String!, $tokenAddress: String!, $price: Float!, $buyerBroker: String, $buyerBrokerBasisPoints: Float) {
  createBuyTx(buyerAddress: $buyerAddress, tokenAddress: $tokenAddress, price: $price, buyerBroker: $buyerBroker, buyerBrokerBasisPoints: $buyerBrokerBasisPoints) {
    stdBuffer
    error
  }
}"#;

const MARKETPLACE_SNAPSHOTS_QUERY: &str = r#"
query GetMarketPlaceSnapshots($condition: GetMarketPlaceSnapshotCondition, $orderBy: [OrderConfig], $paginationInfo: PaginationConfig) {
  getMarketPlaceSnapshots(condition: $condition, order_by: $orderBy, pagination_info: $paginationInfo) {
    market_place_snapshots {
      token_address
      lowest_listing_mpa {
        price
        marketplace_program_id
      }
    }
    pagination_info {
      current_page_number
      has_next_page
    }
  }
}"#;

const PROJECT_STATS_QUERY: &str = r#"
query GetProjectStats($conditions: GetProjectStatsCondition, $orderBy: [ProjectStatsOrderConfig], $paginationInfo: PaginationConfig) {
  getProjectStats(conditions: $conditions, order_by: $orderBy, pagination_info: $paginationInfo) {
    project_stats {
      project_id
      floor_price
      project {
        display_name
        img_url
        website
      }
    }
    pagination_info {
      current_page_number
      has_next_page
    }
  }
}"#;

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBuyTxData {
    create_buy_tx: CreateBuyTxResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBuyTxResult {
    #[serde(default)]
    std_buffer: Option<Vec<u8>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PaginationInfo {
    #[serde(default)]
    has_next_page: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotsData {
    get_market_place_snapshots: SnapshotsPage,
}

#[derive(Debug, Deserialize)]
struct SnapshotsPage {
    #[serde(default)]
    market_place_snapshots: Vec<WireSnapshot>,
    pagination_info: PaginationInfo,
}

#[derive(Debug, Deserialize)]
struct WireSnapshot {
    token_address: String,
    #[serde(default)]
    lowest_listing_mpa: Option<WireListing>,
}

#[derive(Debug, Deserialize)]
struct WireListing {
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    marketplace_program_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectStatsData {
    get_project_stats: ProjectStatsPage,
}

#[derive(Debug, Deserialize)]
struct ProjectStatsPage {
    #[serde(default)]
    project_stats: Vec<WireProjectStat>,
    pagination_info: PaginationInfo,
}

#[derive(Debug, Deserialize)]
struct WireProjectStat {
    project_id: String,
    #[serde(default)]
    floor_price: Option<f64>,
    #[serde(default)]
    project: Option<WireProject>,
}

#[derive(Debug, Default, Deserialize)]
struct WireProject {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    img_url: Option<String>,
    #[serde(default)]
    website: Option<String>,
}

impl WireSnapshot {
    fn into_listing(self) -> Option<ListingSnapshot> {
        let listing = self.lowest_listing_mpa?;
        Some(ListingSnapshot {
            token_address: self.token_address,
            price: listing.price?,
            marketplace_program_id: listing.marketplace_program_id?,
        })
    }
}

impl From<WireProjectStat> for ProjectStat {
    fn from(stat: WireProjectStat) -> Self {
        let project = stat.project.unwrap_or_default();
        ProjectStat {
            project_id: stat.project_id,
            display_name: project.display_name,
            img_url: project.img_url,
            website: project.website,
            floor_price: stat.floor_price,
        }
    }
}

pub struct HyperspaceService {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl HyperspaceService {
    pub fn new(client: reqwest::Client, url: String, api_key: String) -> Self {
        Self {
            client,
            url,
            api_key,
        }
    }

    async fn query<T: DeserializeOwned>(
        &self,
        operation_name: &str,
        query: &str,
        variables: Value,
    ) -> Result<T, MarketplaceError> {
        debug!("{} via {}", operation_name, mask_url(&self.url));

        let response: GraphQlResponse<T> = self
            .client
            .post(&self.url)
            .header("Authorization", &self.api_key)
            .json(&json!({
                "operationName": operation_name,
                "query": query,
                "variables": variables,
            }))
            .send()
            .await
            .map_err(ProviderError::from)?
            .error_for_status()
            .map_err(ProviderError::from)?
            .json()
            .await
            .map_err(|e| MarketplaceError::InvalidResponse(e.to_string()))?;

        if !response.errors.is_empty() {
            let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
            return Err(MarketplaceError::Query(messages.join("; ")));
        }

        response
            .data
            .ok_or_else(|| MarketplaceError::InvalidResponse("missing data".to_string()))
    }
}

#[async_trait]
impl MarketplaceServiceTrait for HyperspaceService {
    async fn create_buy_tx(
        &self,
        buyer: &Pubkey,
        token: &Pubkey,
        price: f64,
    ) -> Result<Vec<u8>, MarketplaceError> {
        let data: CreateBuyTxData = self
            .query(
                "CreateBuyTx",
                CREATE_BUY_TX_QUERY,
                json!({
                    "buyerAddress": buyer.to_string(),
                    "tokenAddress": token.to_string(),
                    "price": price,
                    "buyerBroker": BUYER_BROKER,
                    "buyerBrokerBasisPoints": BUYER_BROKER_BASIS_POINTS,
                }),
            )
            .await?;

        let result = data.create_buy_tx;
        if let Some(error) = result.error {
            return Err(MarketplaceError::Query(error));
        }
        result
            .std_buffer
            .filter(|bytes| !bytes.is_empty())
            .ok_or_else(|| MarketplaceError::InvalidResponse("empty transaction buffer".into()))
    }

    async fn get_listing_snapshots(
        &self,
        project_id: &str,
        page_number: u32,
        sort_order: SortOrder,
    ) -> Result<ProviderPage<ListingSnapshot>, MarketplaceError> {
        let data: SnapshotsData = self
            .query(
                "GetMarketPlaceSnapshots",
                MARKETPLACE_SNAPSHOTS_QUERY,
                json!({
                    "condition": {
                        "projects": [{ "project_id": project_id }],
                        "only_listings": true,
                    },
                    "orderBy": [{
                        "field_name": "lowest_listing_price",
                        "sort_order": sort_order.to_string(),
                    }],
                    "paginationInfo": { "page_number": page_number },
                }),
            )
            .await?;

        let page = data.get_market_place_snapshots;
        Ok(ProviderPage {
            items: page
                .market_place_snapshots
                .into_iter()
                .filter_map(WireSnapshot::into_listing)
                .collect(),
            has_next_page: page.pagination_info.has_next_page,
        })
    }

    async fn get_project_stats(
        &self,
        filter: FloorPriceFilter,
        page_number: u32,
        page_size: usize,
        sort_order: SortOrder,
    ) -> Result<ProviderPage<ProjectStat>, MarketplaceError> {
        let mut floor_price_filter = serde_json::Map::new();
        if let Some(min) = filter.min {
            floor_price_filter.insert("min".into(), json!(min));
        }
        if let Some(max) = filter.max {
            floor_price_filter.insert("max".into(), json!(max));
        }

        let data: ProjectStatsData = self
            .query(
                "GetProjectStats",
                PROJECT_STATS_QUERY,
                json!({
                    "conditions": { "floor_price_filter": floor_price_filter },
                    "orderBy": [{
                        "field_name": "floor_price",
                        "sort_order": sort_order.to_string(),
                    }],
                    "paginationInfo": {
                        "page_number": page_number,
                        "page_size": page_size,
                    },
                }),
            )
            .await?;

        let page = data.get_project_stats;
        Ok(ProviderPage {
            items: page.project_stats.into_iter().map(ProjectStat::from).collect(),
            has_next_page: page.pagination_info.has_next_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn service(server: &mockito::ServerGuard) -> HyperspaceService {
        HyperspaceService::new(
            reqwest::Client::new(),
            format!("{}/graphql", server.url()),
            "test-key".to_string(),
        )
    }

    async fn respond(server: &mut mockito::ServerGuard, operation: &str, body: Value) -> mockito::Mock {
        server
            .mock("POST", "/graphql")
            .match_header("authorization", "test-key")
            .match_body(Matcher::PartialJson(json!({ "operationName": operation })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    #[actix_rt::test]
    async fn test_create_buy_tx_returns_buffer() {
        let mut server = mockito::Server::new_async().await;
        let mock = respond(
            &mut server,
            "CreateBuyTx",
            json!({"data": {"createBuyTx": {"stdBuffer": [1, 2, 3], "error": null}}}),
        )
        .await;

        let bytes = service(&server)
            .create_buy_tx(&Pubkey::new_unique(), &Pubkey::new_unique(), 1.5)
            .await
            .unwrap();

        assert_eq!(bytes, vec![1, 2, 3]);
        mock.assert_async().await;
    }

    #[actix_rt::test]
    async fn test_create_buy_tx_takes_no_broker_fee() {
        let mut server = mockito::Server::new_async().await;
        let buyer = Pubkey::new_unique();
        let token = Pubkey::new_unique();
        let mock = server
            .mock("POST", "/graphql")
            .match_body(Matcher::PartialJson(json!({
                "operationName": "CreateBuyTx",
                "variables": {
                    "buyerAddress": buyer.to_string(),
                    "tokenAddress": token.to_string(),
                    "price": 2.5,
                    "buyerBroker": "",
                    "buyerBrokerBasisPoints": 0
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"data": {"createBuyTx": {"stdBuffer": [9], "error": null}}}).to_string())
            .create_async()
            .await;

        let bytes = service(&server)
            .create_buy_tx(&buyer, &token, 2.5)
            .await
            .unwrap();

        assert_eq!(bytes, vec![9]);
        mock.assert_async().await;
    }

    #[actix_rt::test]
    async fn test_create_buy_tx_reports_provider_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = respond(
            &mut server,
            "CreateBuyTx",
            json!({"data": {"createBuyTx": {"stdBuffer": null, "error": "listing not found"}}}),
        )
        .await;

        let err = service(&server)
            .create_buy_tx(&Pubkey::new_unique(), &Pubkey::new_unique(), 1.5)
            .await
            .unwrap_err();

        assert!(matches!(err, MarketplaceError::Query(msg) if msg == "listing not found"));
    }

    #[actix_rt::test]
    async fn test_graphql_errors_are_surfaced() {
        let mut server = mockito::Server::new_async().await;
        let _mock = respond(
            &mut server,
            "GetProjectStats",
            json!({"data": null, "errors": [{"message": "unauthorized"}]}),
        )
        .await;

        let err = service(&server)
            .get_project_stats(FloorPriceFilter::default(), 1, 10, SortOrder::Desc)
            .await
            .unwrap_err();

        assert!(matches!(err, MarketplaceError::Query(msg) if msg == "unauthorized"));
    }

    #[actix_rt::test]
    async fn test_listing_snapshots_drop_unlisted_tokens() {
        let mut server = mockito::Server::new_async().await;
        let _mock = respond(
            &mut server,
            "GetMarketPlaceSnapshots",
            json!({"data": {"getMarketPlaceSnapshots": {
                "market_place_snapshots": [
                    {"token_address": "tokA", "lowest_listing_mpa": {"price": 2.0, "marketplace_program_id": "progA"}},
                    {"token_address": "tokB", "lowest_listing_mpa": null},
                    {"token_address": "tokC", "lowest_listing_mpa": {"price": null, "marketplace_program_id": "progC"}}
                ],
                "pagination_info": {"current_page_number": 1, "has_next_page": true}
            }}}),
        )
        .await;

        let page = service(&server)
            .get_listing_snapshots("degods", 1, SortOrder::Desc)
            .await
            .unwrap();

        assert!(page.has_next_page);
        assert_eq!(
            page.items,
            vec![ListingSnapshot {
                token_address: "tokA".into(),
                price: 2.0,
                marketplace_program_id: "progA".into(),
            }]
        );
    }

    #[actix_rt::test]
    async fn test_project_stats_sends_floor_filter() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .match_body(Matcher::PartialJson(json!({
                "variables": {
                    "conditions": {"floor_price_filter": {"max": 3.0}},
                    "paginationInfo": {"page_number": 2, "page_size": 10}
                }
            })))
            .with_status(200)
            .with_body(
                json!({"data": {"getProjectStats": {
                    "project_stats": [
                        {"project_id": "okay_bears", "floor_price": 2.5,
                         "project": {"display_name": "Okay Bears", "img_url": "https://img", "website": null}}
                    ],
                    "pagination_info": {"current_page_number": 2, "has_next_page": false}
                }}})
                .to_string(),
            )
            .create_async()
            .await;

        let page = service(&server)
            .get_project_stats(
                FloorPriceFilter {
                    min: None,
                    max: Some(3.0),
                },
                2,
                10,
                SortOrder::Desc,
            )
            .await
            .unwrap();

        assert!(!page.has_next_page);
        assert_eq!(page.items[0].display_name.as_deref(), Some("Okay Bears"));
        assert_eq!(page.items[0].website, None);
        mock.assert_async().await;
    }

    #[actix_rt::test]
    async fn test_http_status_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/graphql")
            .with_status(502)
            .create_async()
            .await;

        let err = service(&server)
            .get_listing_snapshots("degods", 1, SortOrder::Asc)
            .await
            .unwrap_err();

        assert!(matches!(err, MarketplaceError::Http(ProviderError::BadGateway)));
    }
}
