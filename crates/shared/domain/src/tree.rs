//! Directory tree naming scheme.
//!
//! Maps configuration records to canonical distinguished names and
//! decomposes incoming names back into their relative components.
//! Structure (suffixes, attribute prefixes) is matched ASCII
//! case-insensitively. Names are returned as given; the bind path
//! lower-cases the whole DN first.

use crate::constants::{MAX_BIND_COMPONENTS, OU_PREFIX};
use crate::error::{DomainError, DomainResult};

/// Naming scheme of the synthesized tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryTree {
    base_dn: String,
    name_attr: String,
    group_ou: String,
}

/// Identity named by a bind DN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindIdentity<'a> {
    pub user_name: &'a str,
    /// Present only for `<attr>=<user>,ou=<group>,<base>` names
    pub group_name: Option<&'a str>,
}

impl DirectoryTree {
    pub fn new(
        base_dn: impl Into<String>,
        name_attr: impl Into<String>,
        group_ou: impl Into<String>,
    ) -> Self {
        Self {
            base_dn: base_dn.into(),
            name_attr: name_attr.into(),
            group_ou: group_ou.into(),
        }
    }

    pub fn base_dn(&self) -> &str {
        &self.base_dn
    }

    pub fn name_attr(&self) -> &str {
        &self.name_attr
    }

    pub fn group_ou(&self) -> &str {
        &self.group_ou
    }

    /// Check whether `dn` lies strictly under the base (suffix `,<base>`).
    pub fn contains(&self, dn: &str) -> bool {
        self.relative_part(dn).is_some()
    }

    /// Check whether `dn` is the base itself or lies under it.
    pub fn is_within(&self, dn: &str) -> bool {
        dn.eq_ignore_ascii_case(&self.base_dn) || self.contains(dn)
    }

    /// Split a name under the base into its relative components.
    ///
    /// Only one- and two-component names are part of the tree.
    pub fn relative_components<'a>(&self, dn: &'a str) -> DomainResult<Vec<&'a str>> {
        let relative = self
            .relative_part(dn)
            .ok_or_else(|| DomainError::OutsideBase {
                dn: dn.to_string(),
                base: self.base_dn.clone(),
            })?;

        let parts: Vec<&str> = relative.split(',').collect();
        if parts.len() > MAX_BIND_COMPONENTS {
            return Err(DomainError::ComponentCount {
                dn: dn.to_string(),
                count: parts.len(),
            });
        }
        Ok(parts)
    }

    /// Resolve a bind DN into the user and optional group it names.
    pub fn parse_bind_dn<'a>(&self, dn: &'a str) -> DomainResult<BindIdentity<'a>> {
        let parts = self.relative_components(dn)?;
        let name_prefix = format!("{}=", self.name_attr);

        let user_name = trim_prefix_ignore_case(parts[0], &name_prefix);
        let group_name = parts
            .get(1)
            .map(|ou| trim_prefix_ignore_case(ou, OU_PREFIX));

        Ok(BindIdentity {
            user_name,
            group_name,
        })
    }

    /// `<attr>=<user>,ou=<group>,<base>`
    pub fn user_dn(&self, user_name: &str, group_name: &str) -> String {
        format!(
            "{}={},{}{},{}",
            self.name_attr, user_name, OU_PREFIX, group_name, self.base_dn
        )
    }

    /// `<attr>=<group>,ou=<group ou>,<base>`
    pub fn group_dn(&self, group_name: &str) -> String {
        format!(
            "{}={},{}{},{}",
            self.name_attr, group_name, OU_PREFIX, self.group_ou, self.base_dn
        )
    }

    /// `ou=<name>,<base>`
    pub fn ou_dn(&self, ou: &str) -> String {
        format!("{}{},{}", OU_PREFIX, ou, self.base_dn)
    }

    fn relative_part<'a>(&self, dn: &'a str) -> Option<&'a str> {
        let suffix = format!(",{}", self.base_dn);
        strip_suffix_ignore_case(dn, &suffix)
    }
}

fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let split = value.len().checked_sub(suffix.len())?;
    if !value.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = value.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

/// Strip `prefix` if present, otherwise return the value unchanged.
fn trim_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> &'a str {
    if value.len() >= prefix.len()
        && value.is_char_boundary(prefix.len())
        && value[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        &value[prefix.len()..]
    } else {
        value
    }
}
