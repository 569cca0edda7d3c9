//! Commands module - CLI command implementations.

pub mod bind;
pub mod check;
pub mod search;
