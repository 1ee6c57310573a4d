//! Core relay logic: transaction building, the relay stages and the
//! read-only methods.

mod transaction;
pub use transaction::*;

mod relay;
pub use relay::*;

mod reads;
pub use reads::*;
