//! Directory-level constants.
//!
//! Fixed names and defaults of the synthesized directory tree.

// =============================================================================
// Tree shape
// =============================================================================

/// Organizational unit holding service accounts
pub const OU_SERVICES: &str = "Services";

/// Organizational unit holding people
pub const OU_PEOPLE: &str = "People";

/// Attribute prefix of an organizational unit RDN
pub const OU_PREFIX: &str = "ou=";

/// Default naming attribute for users and groups
pub const DEFAULT_NAME_ATTR: &str = "cn";

/// Default organizational unit that holds groups
pub const DEFAULT_GROUP_OU: &str = "groups";

/// Bind DNs under the base may carry at most a user and an OU component
pub const MAX_BIND_COMPONENTS: usize = 2;

// =============================================================================
// Object classes
// =============================================================================

pub const OC_TOP: &str = "top";
pub const OC_ORGANIZATIONAL_UNIT: &str = "organizationalUnit";
pub const OC_POSIX_GROUP: &str = "posixGroup";
pub const OC_POSIX_ACCOUNT: &str = "posixAccount";
pub const OC_ACCOUNT: &str = "account";
pub const OC_SHADOW_ACCOUNT: &str = "shadowAccount";

// =============================================================================
// Account defaults
// =============================================================================

/// Home directory prefix used when the configuration does not set one
pub const DEFAULT_HOME_PREFIX: &str = "/home/";

/// Login shell for users without an explicit one
pub const DEFAULT_LOGIN_SHELL: &str = "/bin/bash";

/// Value of the `accountStatus` attribute on every user entry
pub const ACCOUNT_STATUS_ACTIVE: &str = "active";

/// Suffix appended to names for `description` and `gecos`
pub const VIA_LDAP_SUFFIX: &str = "via LDAP";

/// Format the `"<name> via LDAP"` description value
pub fn via_ldap(name: &str) -> String {
    format!("{} {}", name, VIA_LDAP_SUFFIX)
}

// =============================================================================
// Authentication
// =============================================================================

/// Length of a hex-encoded SHA-256 digest
pub const SHA256_HEX_LENGTH: usize = 64;

/// `service` query value sent to the single-sign-on endpoint
pub const SSO_SERVICE_LOGIN: &str = "login";
