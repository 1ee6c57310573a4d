//! Constants for the on-chain metadata program.

/// Maximum serialized metadata payload size in bytes (inclusive).
pub const MAX_METADATA_PAYLOAD_BYTES: usize = 500;

/// Anchor instruction names, hashed into 8-byte discriminators.
pub const METADATA_IX_INITIALIZE: &str = "initialize";
pub const METADATA_IX_WRITE: &str = "write";
pub const METADATA_IX_VALIDATE: &str = "validate";
pub const METADATA_IX_CLOSE: &str = "close";

/// Namespace prefix Anchor uses when hashing instruction names.
pub const ANCHOR_GLOBAL_NAMESPACE: &str = "global";
