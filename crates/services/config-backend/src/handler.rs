//! Backend boundary consumed by the directory-protocol server.
//!
//! `ConfigHandler` answers bind, search, and close requests from the
//! configuration snapshot. Every failure is flattened to a coarse result
//! code here; the reason only goes to the log.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use common::{AppError, AppResult, Counter, LdapResultCode, Stats};
use domain::DirectoryEntry;

use crate::client::SsoClient;
use crate::config::DirectoryConfig;
use crate::directory::EntrySynthesizer;
use crate::service::{Authenticator, SearchDispatcher};

/// Peer of the connection a request arrived on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionContext {
    pub remote_addr: Option<SocketAddr>,
}

impl ConnectionContext {
    pub fn new(remote_addr: SocketAddr) -> Self {
        Self {
            remote_addr: Some(remote_addr),
        }
    }
}

impl fmt::Display for ConnectionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.remote_addr {
            Some(addr) => write!(f, "{}", addr),
            None => f.write_str("local"),
        }
    }
}

/// Parsed search request handed over by the protocol layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub base_dn: String,
    /// Raw filter string, used for diagnostics
    pub filter: String,
    /// Object class extracted from the filter; `None` if it could not be parsed
    pub filter_object_class: Option<String>,
}

impl SearchRequest {
    pub fn new(
        base_dn: impl Into<String>,
        filter: impl Into<String>,
        filter_object_class: Option<String>,
    ) -> Self {
        Self {
            base_dn: base_dn.into(),
            filter: filter.into(),
            filter_object_class,
        }
    }
}

/// Entries plus result code; `diagnostic` is safe to return to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub entries: Vec<DirectoryEntry>,
    pub result_code: LdapResultCode,
    pub diagnostic: Option<String>,
}

impl SearchResult {
    pub fn success(entries: Vec<DirectoryEntry>) -> Self {
        Self {
            entries,
            result_code: LdapResultCode::Success,
            diagnostic: None,
        }
    }

    pub fn failure(err: &AppError) -> Self {
        Self {
            entries: Vec::new(),
            result_code: err.result_code(),
            diagnostic: Some(err.user_message()),
        }
    }
}

/// Pluggable directory backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Authenticate a simple bind; only `Success` or `InvalidCredentials`
    async fn bind(&self, bind_dn: &str, password: &str, conn: &ConnectionContext)
        -> LdapResultCode;

    /// Answer a search on behalf of `bind_dn`
    async fn search(
        &self,
        bind_dn: &str,
        request: &SearchRequest,
        conn: &ConnectionContext,
    ) -> SearchResult;

    /// Connection closed
    async fn close(&self, bound_dn: &str, conn: &ConnectionContext) -> AppResult<()>;
}

/// Backend serving a static configuration snapshot.
pub struct ConfigHandler {
    config: Arc<DirectoryConfig>,
    authenticator: Authenticator,
    stats: Arc<dyn Stats>,
}

impl ConfigHandler {
    pub fn new(
        config: Arc<DirectoryConfig>,
        sso: Option<Arc<dyn SsoClient>>,
        stats: Arc<dyn Stats>,
    ) -> Self {
        Self {
            authenticator: Authenticator::new(config.clone(), sso),
            config,
            stats,
        }
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    fn search_entries(
        &self,
        bind_dn: &str,
        request: &SearchRequest,
    ) -> AppResult<Vec<DirectoryEntry>> {
        let tree = self.config.tree();

        if bind_dn.is_empty() {
            return Err(AppError::insufficient_access(
                "Anonymous BindDN not allowed",
            ));
        }
        if !tree.contains(bind_dn) {
            return Err(AppError::insufficient_access(format!(
                "BindDN {} not in our BaseDN {}",
                bind_dn,
                tree.base_dn()
            )));
        }
        if !tree.is_within(&request.base_dn) {
            return Err(AppError::insufficient_access(format!(
                "search BaseDN {} is not in our BaseDN {}",
                request.base_dn,
                tree.base_dn()
            )));
        }

        let object_class = request.filter_object_class.as_deref().ok_or_else(|| {
            AppError::operations(format!("error parsing filter: {}", request.filter))
        })?;

        let dispatcher = SearchDispatcher::new(EntrySynthesizer::new(&self.config, &tree));
        dispatcher.search(object_class).map_err(|e| match e {
            AppError::Operations(msg) => {
                AppError::Operations(format!("{} [{}]", msg, request.filter))
            }
            other => other,
        })
    }
}

#[async_trait]
impl Backend for ConfigHandler {
    async fn bind(
        &self,
        bind_dn: &str,
        password: &str,
        conn: &ConnectionContext,
    ) -> LdapResultCode {
        debug!("Bind request as {} from {}", bind_dn, conn);
        self.stats.incr(Counter::BindRequests);

        match self.authenticator.bind(bind_dn, password).await {
            Ok(method) => {
                self.stats.incr(Counter::BindSuccesses);
                debug!("Bind success ({}) as {} from {}", method, bind_dn, conn);
                LdapResultCode::Success
            }
            Err(e) => {
                warn!(
                    "Bind Error [{}]: {} (bind DN {} from {})",
                    e.code(),
                    e,
                    bind_dn,
                    conn
                );
                LdapResultCode::InvalidCredentials
            }
        }
    }

    async fn search(
        &self,
        bind_dn: &str,
        request: &SearchRequest,
        conn: &ConnectionContext,
    ) -> SearchResult {
        debug!(
            "Search request as {} from {} for {}",
            bind_dn, conn, request.filter
        );
        self.stats.incr(Counter::SearchRequests);

        match self.search_entries(bind_dn, request) {
            Ok(entries) => {
                self.stats.incr(Counter::SearchSuccesses);
                debug!("Search OK: {} ({} entries)", request.filter, entries.len());
                SearchResult::success(entries)
            }
            Err(e) => {
                warn!("Search Error [{}]: {}", e.code(), e);
                SearchResult::failure(&e)
            }
        }
    }

    async fn close(&self, bound_dn: &str, conn: &ConnectionContext) -> AppResult<()> {
        debug!("Close as {} from {}", bound_dn, conn);
        self.stats.incr(Counter::Closes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;
    use common::MockStats;
    use domain::{Group, User};

    fn config() -> Arc<DirectoryConfig> {
        Arc::new(DirectoryConfig {
            backend: BackendConfig {
                base_dn: "dc=example,dc=com".to_string(),
                ..Default::default()
            },
            users: vec![User::new("alice", 5001, 5501)],
            groups: vec![Group::new("staff", 5501)],
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_failed_bind_counts_request_only() {
        let mut stats = MockStats::new();
        stats
            .expect_incr()
            .withf(|c| *c == Counter::BindRequests)
            .times(1)
            .return_const(());
        let handler = ConfigHandler::new(config(), None, Arc::new(stats));

        let code = handler
            .bind(
                "cn=alice,dc=example,dc=com",
                "wrong",
                &ConnectionContext::default(),
            )
            .await;
        assert_eq!(code, LdapResultCode::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_close_counts() {
        let mut stats = MockStats::new();
        stats
            .expect_incr()
            .withf(|c| *c == Counter::Closes)
            .times(1)
            .return_const(());
        let handler = ConfigHandler::new(config(), None, Arc::new(stats));

        let result = handler
            .close("cn=alice,dc=example,dc=com", &ConnectionContext::default())
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unparseable_filter_is_operations_error() {
        let handler = ConfigHandler::new(config(), None, Arc::new(common::NoopStats));
        let request = SearchRequest::new("dc=example,dc=com", "(objectClass=", None);

        let result = handler
            .search(
                "cn=alice,dc=example,dc=com",
                &request,
                &ConnectionContext::default(),
            )
            .await;
        assert_eq!(result.result_code, LdapResultCode::OperationsError);
        assert_eq!(
            result.diagnostic.as_deref(),
            Some("error parsing filter: (objectClass=")
        );
    }

    #[test]
    fn test_connection_display() {
        let conn = ConnectionContext::new("10.0.0.7:40000".parse().unwrap());
        assert_eq!(conn.to_string(), "10.0.0.7:40000");
        assert_eq!(ConnectionContext::default().to_string(), "local");
    }
}
