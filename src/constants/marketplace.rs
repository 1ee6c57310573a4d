//! Constants for the marketplace and DAS collaborators.

/// Default Hyperspace GraphQL endpoint.
pub const DEFAULT_HYPERSPACE_API_URL: &str = "https://beta.api.solanalysis.com/graphql";

/// Default Helius RPC base URL (DAS read API).
pub const DEFAULT_HELIUS_RPC_URL: &str = "https://rpc.helius.xyz";

/// Buy transactions are created without a broker fee.
pub const BUYER_BROKER: &str = "";
pub const BUYER_BROKER_BASIS_POINTS: u16 = 0;

/// Magic Eden's program requires its own API key to buy programmatically,
/// so its listings are excluded.
pub const MAGIC_EDEN_PROGRAM_ID: &str = "M2mx93ekt1fmXSVkTrUL9xVFHkmME8HTUi5Cyc5aF7K";

/// Defaults for listing/collection pagination.
pub const DEFAULT_PAGE_NUMBER: u32 = 1;
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Upper bound on provider pages fetched to fill one caller page.
pub const MAX_PROVIDER_PAGE_FETCHES: u32 = 10;

/// DAS `getAssetsByOwner` page size, small so results fit an LLM context.
pub const DAS_ASSETS_LIMIT: u32 = 5;
