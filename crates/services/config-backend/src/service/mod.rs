//! Bind and search business logic.

mod authenticator;
mod search;

pub use authenticator::{AuthMethod, Authenticator};
pub use search::{FilterClass, SearchDispatcher};
