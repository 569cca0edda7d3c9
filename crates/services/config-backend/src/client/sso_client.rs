//! HTTP client for the single-sign-on login service.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use common::{AppError, AppResult, HttpClientConfig};
use domain::SSO_SERVICE_LOGIN;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Login response body: `{"ret": bool, "ticket": string, "error": string}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SsoResponse {
    #[serde(default)]
    pub ret: bool,
    #[serde(default)]
    pub ticket: String,
    #[serde(default)]
    pub error: String,
}

/// Remote credential check, one attempt per call.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SsoClient: Send + Sync {
    /// Ask the login service whether `username` / `password` are valid
    async fn login(&self, username: &str, password: &str) -> AppResult<SsoResponse>;
}

/// `reqwest` implementation issuing a single bounded GET.
pub struct HttpSsoClient {
    client: Client,
    url: Url,
}

impl HttpSsoClient {
    /// Build a client for `url` with the configured timeouts.
    ///
    /// Any query string already on `url` is dropped; each login request
    /// carries only its own parameters.
    pub fn new(url: impl AsRef<str>, config: &HttpClientConfig) -> AppResult<Self> {
        let raw = url.as_ref();
        let mut url = Url::parse(raw)
            .map_err(|e| AppError::config(format!("invalid authurl {}: {}", endpoint(raw), e)))?;
        url.set_query(None);

        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { client, url })
    }

    /// Endpoint without its query string, safe for logs
    pub fn endpoint(&self) -> &str {
        self.url.as_str()
    }
}

/// Strip the query string from a URL
pub fn endpoint(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

#[async_trait]
impl SsoClient for HttpSsoClient {
    async fn login(&self, username: &str, password: &str) -> AppResult<SsoResponse> {
        debug!("Single sign-on login for {} at {}", username, self.endpoint());

        let response = self
            .client
            .get(self.url.clone())
            .query(&[
                ("service", SSO_SERVICE_LOGIN),
                ("username", username),
                ("password", password),
                ("token", ""),
            ])
            .send()
            .await?;

        debug!("Single sign-on responded with {}", response.status());

        let body = response.bytes().await?;
        let parsed: SsoResponse = serde_json::from_slice(&body)
            .map_err(|e| AppError::sso(format!("malformed response: {}", e)))?;

        debug!(
            "Single sign-on result ret={} error={:?}",
            parsed.ret, parsed.error
        );
        Ok(parsed)
    }
}
