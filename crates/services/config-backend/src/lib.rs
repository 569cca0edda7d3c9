//! Configuration-backed directory backend.
//!
//! Presents the users and groups of a configuration file as a virtual
//! directory tree and authenticates binds against it, first through a
//! single-sign-on service and then against locally stored digests.

pub mod client;
pub mod config;
pub mod directory;
pub mod handler;
pub mod service;

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use common::{AppResult, Stats};

use crate::client::{endpoint, HttpSsoClient, SsoClient};
use crate::config::DirectoryConfig;
use crate::handler::ConfigHandler;

pub use handler::{Backend, ConnectionContext, SearchRequest, SearchResult};

/// Load a configuration file and build a handler for it.
pub fn load_handler<P: AsRef<Path>>(path: P, stats: Arc<dyn Stats>) -> AppResult<ConfigHandler> {
    let config = DirectoryConfig::from_file(path)?;
    build_handler(config, stats)
}

/// Build a handler, wiring the single-sign-on client when a URL is configured.
pub fn build_handler(config: DirectoryConfig, stats: Arc<dyn Stats>) -> AppResult<ConfigHandler> {
    let sso: Option<Arc<dyn SsoClient>> = match config.backend.auth_url.as_deref() {
        Some(url) => {
            info!(
                "Single sign-on enabled at {} (timeout {} ms)",
                endpoint(url),
                config.sso.request_timeout_ms
            );
            Some(Arc::new(HttpSsoClient::new(url, &config.sso)?))
        }
        None => {
            info!("Single sign-on disabled, using local digests only");
            None
        }
    };

    info!(
        "Serving {} users and {} groups under {}",
        config.users.len(),
        config.groups.len(),
        config.backend.base_dn
    );

    Ok(ConfigHandler::new(Arc::new(config), sso, stats))
}
