//! Constants for decoding Anchor program accounts.

/// Seed of the account holding a program's published IDL, derived from the
/// program's empty-seed PDA.
pub const ANCHOR_IDL_SEED: &str = "anchor:idl";

/// Namespace prefix Anchor uses when hashing account type names.
pub const ANCHOR_ACCOUNT_NAMESPACE: &str = "account";

/// IDL account layout: discriminator, authority, then a length-prefixed
/// zlib stream of the IDL JSON.
pub const ANCHOR_IDL_HEADER_BYTES: usize = 8 + 32;

/// Deepest type nesting followed while decoding account data.
pub const MAX_IDL_TYPE_DEPTH: usize = 32;
