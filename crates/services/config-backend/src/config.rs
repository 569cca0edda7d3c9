//! Directory configuration snapshot.
//!
//! The snapshot is read once from a TOML file, overridden from the
//! environment, validated, and then shared read-only by every request.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use common::{AppError, AppResult, HttpClientConfig};
use domain::{
    DirectoryTree, Group, User, DEFAULT_GROUP_OU, DEFAULT_HOME_PREFIX, DEFAULT_NAME_ATTR,
};

/// Backend settings (`[backend]` table).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base distinguished name of the tree
    #[serde(rename = "basedn")]
    pub base_dn: String,
    /// Naming attribute for users and groups (e.g. `cn`)
    #[serde(rename = "nameattr", default = "default_name_attr")]
    pub name_attr: String,
    /// Organizational unit that holds group entries
    #[serde(rename = "groupou", default = "default_group_ou")]
    pub group_ou: String,
    /// Prefix of computed home directories
    #[serde(default = "default_home")]
    pub home: String,
    /// Single-sign-on endpoint; remote authentication is skipped when unset
    #[serde(rename = "authurl", default, skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,
}

fn default_name_attr() -> String {
    DEFAULT_NAME_ATTR.to_string()
}

fn default_group_ou() -> String {
    DEFAULT_GROUP_OU.to_string()
}

fn default_home() -> String {
    DEFAULT_HOME_PREFIX.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_dn: String::new(),
            name_attr: default_name_attr(),
            group_ou: default_group_ou(),
            home: default_home(),
            auth_url: None,
        }
    }
}

/// Full configuration snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DirectoryConfig {
    pub backend: BackendConfig,
    #[serde(default)]
    pub sso: HttpClientConfig,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl DirectoryConfig {
    /// Load, override from the environment, and validate a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut config = Self::parse(&content)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML without environment overrides or validation.
    pub fn parse(content: &str) -> AppResult<Self> {
        toml::from_str(content)
            .map_err(|e| AppError::config(format!("failed to parse config: {}", e)))
    }

    /// Apply `LDAP_BASE_DN`, `LDAP_AUTH_URL`, and `LDAP_AUTH_TIMEOUT_MS`.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(base_dn) = env::var("LDAP_BASE_DN") {
            self.backend.base_dn = base_dn;
        }
        if let Ok(url) = env::var("LDAP_AUTH_URL") {
            self.backend.auth_url = Some(url).filter(|u| !u.is_empty());
        }
        if let Some(timeout) = env::var("LDAP_AUTH_TIMEOUT_MS")
            .ok()
            .and_then(|t| t.parse().ok())
        {
            self.sso.request_timeout_ms = timeout;
        }
    }

    /// Check the snapshot for conflicts that would make lookups ambiguous.
    ///
    /// Users whose primary group does not resolve are only reported; search
    /// still lists them with an empty group name.
    pub fn validate(&self) -> AppResult<()> {
        if self.backend.base_dn.is_empty() {
            return Err(AppError::validation("backend.basedn must be set"));
        }
        if self.backend.name_attr.is_empty() {
            return Err(AppError::validation("backend.nameattr must not be empty"));
        }
        if self.sso.request_timeout_ms == 0 {
            return Err(AppError::validation("sso.request_timeout_ms cannot be 0"));
        }

        let mut user_names = HashSet::new();
        for user in &self.users {
            user.validate()?;
            if !user_names.insert(user.name.as_str()) {
                return Err(AppError::validation(format!(
                    "duplicate user name '{}'",
                    user.name
                )));
            }
        }

        let mut group_names = HashSet::new();
        let mut group_ids = HashSet::new();
        for group in &self.groups {
            group.validate()?;
            if !group_names.insert(group.name.as_str()) {
                return Err(AppError::validation(format!(
                    "duplicate group name '{}'",
                    group.name
                )));
            }
            if !group_ids.insert(group.unix_id) {
                return Err(AppError::validation(format!(
                    "duplicate group id {}",
                    group.unix_id
                )));
            }
        }

        for user in self.users_without_primary_group() {
            warn!(
                "User {} has primary group {} which is not configured",
                user.name, user.primary_group
            );
        }

        Ok(())
    }

    /// Users whose primary group id matches no configured group
    pub fn users_without_primary_group(&self) -> impl Iterator<Item = &User> {
        self.users.iter().filter(move |u| {
            !self.groups.iter().any(|g| g.unix_id == u.primary_group)
        })
    }

    /// Naming scheme derived from the backend settings
    pub fn tree(&self) -> DirectoryTree {
        DirectoryTree::new(
            &self.backend.base_dn,
            &self.backend.name_attr,
            &self.backend.group_ou,
        )
    }
}
