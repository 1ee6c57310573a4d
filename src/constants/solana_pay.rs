//! Constants for the Solana Pay transaction-request protocol.

/// Cluster reported to wallets alongside every transaction.
pub const SOLANA_PAY_NETWORK: &str = "mainnet-beta";

/// Default label shown by wallets on the sign-request GET.
pub const DEFAULT_SOLANA_PAY_LABEL: &str = "Solana GPT Plugin";

/// Icon shown by wallets on the sign-request GET.
pub const SOLANA_PAY_ICON: &str =
    "https://solanapay.com/src/img/branding/Solanapay.com/downloads/gradient.svg";

/// URL scheme wallets recognise for transaction requests.
pub const SOLANA_PAY_SCHEME: &str = "solana";

/// White padding (pixels) added on each side of the QR code so link
/// previews crop it to a square without cutting the code.
pub const QR_HORIZONTAL_PADDING: u32 = 110;

/// Default public Solana RPC endpoint.
pub const DEFAULT_SOLANA_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Page size for `getSignaturesForAddress`. A full page means more history
/// exists; its last signature is the `before` cursor for the next page.
pub const SIGNATURES_PAGE_LIMIT: usize = 11;

/// Highest transaction version the `getTransaction` read accepts.
pub const MAX_SUPPORTED_TRANSACTION_VERSION: u8 = 0;
