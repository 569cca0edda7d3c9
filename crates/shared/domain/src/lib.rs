//! Domain layer - Directory records, naming, and entries.
//!
//! This crate contains pure directory logic with no I/O. It is shared by
//! the backend and the command-line tool.

pub mod constants;
pub mod entry;
pub mod error;
pub mod password;
pub mod tree;
pub mod user;

pub use constants::*;
pub use entry::{DirectoryEntry, EntryAttribute};
pub use error::{DomainError, DomainResult};
pub use password::PasswordDigest;
pub use tree::{BindIdentity, DirectoryTree};
pub use user::{Group, User};
