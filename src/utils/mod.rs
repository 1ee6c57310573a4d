mod base64;
pub use base64::*;

mod html;
pub use html::*;

mod url;
pub use url::*;

#[cfg(test)]
pub mod mocks;
