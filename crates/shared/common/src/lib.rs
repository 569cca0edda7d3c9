//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified error handling and result-code mapping
//! - Configuration structures
//! - The request statistics collaborator

pub mod config;
pub mod error;
pub mod stats;

pub use config::*;
pub use error::{AppError, AppResult, LdapResultCode, OptionExt};
pub use stats::{Counter, InMemoryStats, NoopStats, Stats};

#[cfg(any(test, feature = "test-utils"))]
pub use stats::MockStats;
