pub mod error;

pub use error::{ApiError, UNCONFIRMED_MESSAGE};
