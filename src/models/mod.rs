mod app_state;
pub use app_state::*;

mod envelope;
pub use envelope::*;

mod error;
pub use error::*;

mod marketplace;
pub use marketplace::*;

mod operation;
pub use operation::*;

mod parameter_set;
pub use parameter_set::*;

mod reads;
pub use reads::*;
