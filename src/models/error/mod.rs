mod api;
pub use api::*;

mod relay;
pub use relay::*;
