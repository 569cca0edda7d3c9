//! User and group records of the configuration snapshot.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LOGIN_SHELL, SHA256_HEX_LENGTH};
use crate::error::{DomainError, DomainResult};
use crate::password::PasswordDigest;

/// Configured user account.
///
/// Serialized names follow the lowercase keys of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique, case-sensitive login name
    pub name: String,
    /// Numeric unix user id
    #[serde(rename = "unixid")]
    pub unix_id: u32,
    /// Unix id of the primary group
    #[serde(rename = "primarygroup")]
    pub primary_group: u32,
    /// Unix ids of secondary groups
    #[serde(rename = "othergroups", default)]
    pub other_groups: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail: Option<String>,
    #[serde(rename = "displayname", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "homedirectory", default, skip_serializing_if = "Option::is_none")]
    pub home_directory: Option<String>,
    #[serde(rename = "loginshell", default, skip_serializing_if = "Option::is_none")]
    pub login_shell: Option<String>,
    /// Hex-encoded SHA-256 digest of the local password
    #[serde(rename = "passsha256", default, skip_serializing)]
    pub pass_sha256: Option<String>,
    #[serde(rename = "sshkeys", default)]
    pub ssh_keys: Vec<String>,
}

impl User {
    /// Create a user with only the required fields set
    pub fn new(name: impl Into<String>, unix_id: u32, primary_group: u32) -> Self {
        Self {
            name: name.into(),
            unix_id,
            primary_group,
            ..Default::default()
        }
    }

    /// Check whether the user belongs to a group, primary or secondary
    pub fn is_member_of(&self, gid: u32) -> bool {
        self.primary_group == gid || self.other_groups.contains(&gid)
    }

    /// Mail address, if one is configured and non-empty
    pub fn mail(&self) -> Option<&str> {
        non_empty(&self.mail)
    }

    pub fn display_name(&self) -> Option<&str> {
        non_empty(&self.display_name)
    }

    /// Home directory, falling back to `<prefix><name>`
    pub fn home_directory(&self, prefix: &str) -> String {
        match non_empty(&self.home_directory) {
            Some(home) => home.to_string(),
            None => format!("{}{}", prefix, self.name),
        }
    }

    /// Login shell, falling back to `/bin/bash`
    pub fn login_shell(&self) -> &str {
        non_empty(&self.login_shell).unwrap_or(DEFAULT_LOGIN_SHELL)
    }

    /// Stored password digest, if any
    pub fn password(&self) -> Option<PasswordDigest> {
        non_empty(&self.pass_sha256).map(PasswordDigest::from_hex)
    }

    /// Check record-level invariants
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.is_empty() {
            return Err(DomainError::validation("user name must not be empty"));
        }
        if let Some(digest) = non_empty(&self.pass_sha256) {
            if digest.len() != SHA256_HEX_LENGTH
                || !digest
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
            {
                return Err(DomainError::validation(format!(
                    "user {}: passsha256 must be {} lowercase hex characters",
                    self.name, SHA256_HEX_LENGTH
                )));
            }
        }
        Ok(())
    }
}

/// Configured unix group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(rename = "unixid")]
    pub unix_id: u32,
}

impl Group {
    pub fn new(name: impl Into<String>, unix_id: u32) -> Self {
        Self {
            name: name.into(),
            unix_id,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.is_empty() {
            return Err(DomainError::validation("group name must not be empty"));
        }
        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
