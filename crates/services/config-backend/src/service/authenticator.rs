//! Bind authentication.
//!
//! A bind DN is checked against the tree shape and resolved to a configured
//! user. The user's primary group must exist and, in the two-component form,
//! must be the named group. The credential is then tried remotely and
//! locally, in that order. Each step fails closed.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error};

use common::{AppError, AppResult, OptionExt};
use domain::User;

use crate::client::SsoClient;
use crate::config::DirectoryConfig;
use crate::directory::GroupResolver;

/// Which step accepted the credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Single-sign-on service reported success
    Remote,
    /// Stored SHA-256 digest matched
    Local,
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::Remote => f.write_str("remote"),
            AuthMethod::Local => f.write_str("local"),
        }
    }
}

/// Bind authenticator over a configuration snapshot.
pub struct Authenticator {
    config: Arc<DirectoryConfig>,
    sso: Option<Arc<dyn SsoClient>>,
}

impl Authenticator {
    /// Create an authenticator; without an SSO client only local digests are checked
    pub fn new(config: Arc<DirectoryConfig>, sso: Option<Arc<dyn SsoClient>>) -> Self {
        Self { config, sso }
    }

    /// Validate a bind DN and credential.
    ///
    /// The DN is lower-cased before names are extracted, so configured
    /// user and group names only match in lower case. Errors carry the
    /// reason for logging; callers report every one of them as invalid
    /// credentials.
    pub async fn bind(&self, bind_dn: &str, password: &str) -> AppResult<AuthMethod> {
        let bind_dn = bind_dn.to_lowercase();
        let tree = self.config.tree();
        let identity = tree.parse_bind_dn(&bind_dn)?;
        let resolver = GroupResolver::new(&self.config, &tree);

        let user = resolver
            .resolve_user(identity.user_name)
            .ok_or_not_found(format!("user {}", identity.user_name))?;

        let primary = resolver
            .group_by_id(user.primary_group)
            .ok_or_not_found(format!(
                "primary group {} of user {}",
                user.primary_group, user.name
            ))?;

        if let Some(group_name) = identity.group_name {
            let group = resolver
                .resolve_group(group_name)
                .ok_or_not_found(format!("group {}", group_name))?;
            if group.unix_id != primary.unix_id {
                return Err(AppError::invalid_dn(format!(
                    "user {} primary group is not {}",
                    user.name, group_name
                )));
            }
        }

        self.authenticate(user, password)
            .await
            .ok_or(AppError::InvalidCredentials)
    }

    /// Try the remote service, then the local digest.
    pub async fn authenticate(&self, user: &User, password: &str) -> Option<AuthMethod> {
        if self.try_remote(user, password).await {
            return Some(AuthMethod::Remote);
        }
        if Self::try_local(user, password) {
            return Some(AuthMethod::Local);
        }
        None
    }

    /// Ask the single-sign-on service, identifying the user by mail address.
    ///
    /// Transport and decode failures count as a rejection.
    pub async fn try_remote(&self, user: &User, password: &str) -> bool {
        let Some(sso) = &self.sso else {
            debug!("No single sign-on service configured");
            return false;
        };
        let Some(mail) = user.mail() else {
            debug!("User {} has no mail address, skipping single sign-on", user.name);
            return false;
        };

        match sso.login(mail, password).await {
            Ok(response) => {
                if !response.ret && !response.error.is_empty() {
                    debug!("Single sign-on rejected {}: {}", user.name, response.error);
                }
                response.ret
            }
            Err(e) => {
                error!("Single sign-on request failed for {}: {}", user.name, e);
                false
            }
        }
    }

    /// Compare the credential's SHA-256 digest with the stored one.
    pub fn try_local(user: &User, password: &str) -> bool {
        user.password()
            .map(|digest| digest.verify(password))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MockSsoClient, SsoResponse};
    use crate::config::BackendConfig;
    use domain::{Group, PasswordDigest};
    use mockall::predicate::{always, eq};

    fn config() -> Arc<DirectoryConfig> {
        let mut alice = User::new("alice", 5001, 5501);
        alice.mail = Some("alice@example.com".to_string());
        alice.pass_sha256 = Some(PasswordDigest::digest("local-secret").into_string());
        let nomail = User::new("nomail", 5002, 5501);
        let mut ghost = User::new("ghost", 5003, 7777);
        ghost.pass_sha256 = Some(PasswordDigest::digest("local-secret").into_string());

        Arc::new(DirectoryConfig {
            backend: BackendConfig {
                base_dn: "dc=example,dc=com".to_string(),
                ..Default::default()
            },
            users: vec![alice, nomail, ghost],
            groups: vec![Group::new("staff", 5501), Group::new("admins", 5502)],
            ..Default::default()
        })
    }

    fn accepting_sso() -> MockSsoClient {
        let mut sso = MockSsoClient::new();
        sso.expect_login()
            .with(eq("alice@example.com"), always())
            .returning(|_, password| {
                let ret = password == "remote-secret";
                Ok(SsoResponse {
                    ret,
                    ticket: if ret { "ST-1".to_string() } else { String::new() },
                    error: if ret { String::new() } else { "bad password".to_string() },
                })
            });
        sso
    }

    #[tokio::test]
    async fn test_remote_success() {
        let auth = Authenticator::new(config(), Some(Arc::new(accepting_sso())));

        let method = auth
            .bind("cn=alice,ou=staff,dc=example,dc=com", "remote-secret")
            .await
            .unwrap();
        assert_eq!(method, AuthMethod::Remote);
    }

    #[tokio::test]
    async fn test_remote_rejection_falls_back_to_local() {
        let auth = Authenticator::new(config(), Some(Arc::new(accepting_sso())));

        let method = auth
            .bind("cn=alice,dc=example,dc=com", "local-secret")
            .await
            .unwrap();
        assert_eq!(method, AuthMethod::Local);
    }

    #[tokio::test]
    async fn test_remote_error_falls_back_to_local() {
        let mut sso = MockSsoClient::new();
        sso.expect_login()
            .times(1)
            .returning(|_, _| Err(AppError::sso("connection refused")));
        let auth = Authenticator::new(config(), Some(Arc::new(sso)));

        let method = auth
            .bind("cn=alice,ou=staff,dc=example,dc=com", "local-secret")
            .await;
        tokio_test::assert_ok!(&method);
        assert_eq!(method.unwrap(), AuthMethod::Local);
    }

    #[tokio::test]
    async fn test_wrong_password_everywhere() {
        let auth = Authenticator::new(config(), Some(Arc::new(accepting_sso())));

        let err = auth
            .bind("cn=alice,ou=staff,dc=example,dc=com", "nope")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_group_mismatch_skips_credential_check() {
        let mut sso = MockSsoClient::new();
        sso.expect_login().never();
        let auth = Authenticator::new(config(), Some(Arc::new(sso)));

        let err = auth
            .bind("cn=alice,ou=admins,dc=example,dc=com", "local-secret")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidDn(_)));
    }

    #[tokio::test]
    async fn test_unknown_group_is_rejected() {
        let auth = Authenticator::new(config(), None);

        let err = auth
            .bind("cn=alice,ou=nobody,dc=example,dc=com", "local-secret")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_bind_name_is_lower_cased() {
        let auth = Authenticator::new(config(), None);

        let method = auth
            .bind("CN=ALICE,OU=STAFF,DC=EXAMPLE,DC=COM", "local-secret")
            .await
            .unwrap();
        assert_eq!(method, AuthMethod::Local);
    }

    #[tokio::test]
    async fn test_unresolved_primary_group_fails_closed() {
        let auth = Authenticator::new(config(), None);

        let err = auth
            .bind("cn=ghost,dc=example,dc=com", "local-secret")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_shape_errors_skip_lookup() {
        let mut sso = MockSsoClient::new();
        sso.expect_login().never();
        let auth = Authenticator::new(config(), Some(Arc::new(sso)));

        let outside = auth.bind("cn=alice,dc=other,dc=org", "local-secret").await;
        let too_deep = auth
            .bind("cn=alice,ou=staff,ou=x,dc=example,dc=com", "local-secret")
            .await;

        assert!(matches!(outside, Err(AppError::InvalidDn(_))));
        assert!(matches!(too_deep, Err(AppError::InvalidDn(_))));
    }

    #[tokio::test]
    async fn test_user_without_mail_skips_remote() {
        let mut sso = MockSsoClient::new();
        sso.expect_login().never();
        let auth = Authenticator::new(config(), Some(Arc::new(sso)));
        let nomail = User::new("nomail", 5002, 5501);

        assert!(!auth.try_remote(&nomail, "anything").await);
    }

    #[test]
    fn test_local_without_digest_fails() {
        let user = User::new("nodigest", 5003, 5501);
        assert!(!Authenticator::try_local(&user, ""));
    }
}
