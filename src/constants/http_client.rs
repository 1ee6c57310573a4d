/// Default timeout in seconds for chain RPC and provider HTTP calls.
pub const DEFAULT_RPC_TIMEOUT_SECONDS: u64 = 30;

/// Default HTTP client connection timeout in seconds.
/// Maximum time to wait for establishing a connection.
pub const DEFAULT_HTTP_CLIENT_CONNECT_TIMEOUT_SECONDS: u64 = 2;

/// Default maximum number of idle connections per host in the connection pool.
pub const DEFAULT_HTTP_CLIENT_POOL_MAX_IDLE_PER_HOST: usize = 25;
