/// Default client disconnect timeout in seconds.
/// This is the time the server waits for cleanup after a client disconnects.
pub const DEFAULT_CLIENT_DISCONNECT_TIMEOUT_SECONDS: u64 = 5;

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 3333;

/// Public base URL used when neither `SELF_URL` nor `DEV` is set.
pub const DEFAULT_SELF_URL: &str = "https://solana-gpt-plugin.onrender.com";

/// Static plugin manifest directories.
pub const DEFAULT_WELL_KNOWN_DIR: &str = "./.well-known";
pub const DEV_WELL_KNOWN_DIR: &str = "./.well-known-dev";

/// Body returned for every failure caught by the dispatch layer.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";
