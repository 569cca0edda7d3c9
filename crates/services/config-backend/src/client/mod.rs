//! Clients for external services.

mod sso_client;

pub use sso_client::{endpoint, HttpSsoClient, SsoClient, SsoResponse};

#[cfg(any(test, feature = "test-utils"))]
pub use sso_client::MockSsoClient;
