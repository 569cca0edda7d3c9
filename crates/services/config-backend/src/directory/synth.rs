//! Entry synthesis.
//!
//! Materializes organizational-unit, group, and user entries from the
//! snapshot. Optional attributes are left out entirely rather than emitted
//! empty so presence filters in the protocol layer behave correctly.

use domain::{
    via_ldap, DirectoryEntry, DirectoryTree, Group, User, ACCOUNT_STATUS_ACTIVE, OC_ACCOUNT,
    OC_ORGANIZATIONAL_UNIT, OC_POSIX_ACCOUNT, OC_POSIX_GROUP, OC_SHADOW_ACCOUNT, OC_TOP,
    OU_PEOPLE, OU_SERVICES,
};

use crate::config::DirectoryConfig;
use crate::directory::GroupResolver;

/// Builds directory entries for one snapshot.
pub struct EntrySynthesizer<'a> {
    config: &'a DirectoryConfig,
    tree: &'a DirectoryTree,
    groups: GroupResolver<'a>,
}

impl<'a> EntrySynthesizer<'a> {
    pub fn new(config: &'a DirectoryConfig, tree: &'a DirectoryTree) -> Self {
        Self {
            config,
            tree,
            groups: GroupResolver::new(config, tree),
        }
    }

    /// `Services`, `People`, and the configured group OU
    pub fn organizational_units(&self) -> Vec<DirectoryEntry> {
        [OU_SERVICES, OU_PEOPLE, self.tree.group_ou()]
            .into_iter()
            .map(|ou| {
                DirectoryEntry::new(self.tree.ou_dn(ou))
                    .with_value("ou", ou)
                    .with("objectClass", [OC_TOP, OC_ORGANIZATIONAL_UNIT])
            })
            .collect()
    }

    pub fn groups(&self) -> Vec<DirectoryEntry> {
        self.config.groups.iter().map(|g| self.group_entry(g)).collect()
    }

    pub fn users(&self) -> Vec<DirectoryEntry> {
        self.config.users.iter().map(|u| self.user_entry(u)).collect()
    }

    fn group_entry(&self, group: &Group) -> DirectoryEntry {
        DirectoryEntry::new(self.tree.group_dn(&group.name))
            .with_value(self.tree.name_attr(), group.name.as_str())
            .with_value("description", via_ldap(&group.name))
            .with_value("gidNumber", group.unix_id.to_string())
            .with("objectClass", [OC_POSIX_GROUP])
            .with("uniqueMember", self.groups.member_dns(group.unix_id))
            .with("memberUid", self.groups.member_uids(group.unix_id))
    }

    fn user_entry(&self, user: &User) -> DirectoryEntry {
        let primary = self.groups.group_name(user.primary_group);

        let mut entry = DirectoryEntry::new(self.tree.user_dn(&user.name, primary))
            .with_value(self.tree.name_attr(), user.name.as_str())
            .with_value("uid", user.name.as_str())
            .with_optional("mail", user.mail())
            .with_optional("displayName", user.display_name())
            .with_value("ou", primary)
            .with_value("uidNumber", user.unix_id.to_string())
            .with_value("accountStatus", ACCOUNT_STATUS_ACTIVE)
            .with(
                "objectClass",
                [OC_ACCOUNT, OC_POSIX_ACCOUNT, OC_TOP, OC_SHADOW_ACCOUNT],
            )
            .with_value("homeDirectory", user.home_directory(&self.config.backend.home))
            .with_value("loginShell", user.login_shell())
            .with_value("description", via_ldap(&user.name))
            .with_value("gecos", via_ldap(&user.name))
            .with_value("gidNumber", user.primary_group.to_string())
            .with("memberOf", self.groups.group_dns_for(&user.other_groups));

        if !user.ssh_keys.is_empty() {
            entry = entry.with("sshPublicKey", user.ssh_keys.iter().cloned());
        }
        entry
    }
}
