//! Group lookups and membership over the configuration snapshot.
//!
//! Every lookup is a linear scan; configuration files hold a handful of
//! records and the snapshot is never indexed.

use std::collections::BTreeSet;

use domain::{DirectoryTree, Group, User};

use crate::config::DirectoryConfig;

/// Resolves groups and their members for one snapshot.
pub struct GroupResolver<'a> {
    config: &'a DirectoryConfig,
    tree: &'a DirectoryTree,
}

impl<'a> GroupResolver<'a> {
    pub fn new(config: &'a DirectoryConfig, tree: &'a DirectoryTree) -> Self {
        Self { config, tree }
    }

    /// Find a group by exact, case-sensitive name
    pub fn resolve_group(&self, name: &str) -> Option<&'a Group> {
        self.config.groups.iter().find(|g| g.name == name)
    }

    /// Find a user by exact, case-sensitive name
    pub fn resolve_user(&self, name: &str) -> Option<&'a User> {
        self.config.users.iter().find(|u| u.name == name)
    }

    /// Find a group by numeric id
    pub fn group_by_id(&self, gid: u32) -> Option<&'a Group> {
        self.config.groups.iter().find(|g| g.unix_id == gid)
    }

    /// Name of the group with `gid`, or `""` when none is configured
    pub fn group_name(&self, gid: u32) -> &'a str {
        self.group_by_id(gid).map(|g| g.name.as_str()).unwrap_or("")
    }

    /// Canonical DN of a user, placed under its primary group's name
    pub fn user_dn(&self, user: &User) -> String {
        self.tree.user_dn(&user.name, self.group_name(user.primary_group))
    }

    /// DNs of every primary or secondary member of `gid`, deduplicated
    pub fn member_dns(&self, gid: u32) -> Vec<String> {
        self.members(gid)
            .map(|u| self.user_dn(u))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Names of every primary or secondary member of `gid`, deduplicated
    pub fn member_uids(&self, gid: u32) -> Vec<String> {
        self.members(gid)
            .map(|u| u.name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Group DNs for a list of group ids, skipping ids that do not resolve
    pub fn group_dns_for(&self, gids: &[u32]) -> Vec<String> {
        gids.iter()
            .filter_map(|gid| self.group_by_id(*gid))
            .map(|g| self.tree.group_dn(&g.name))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn members(&self, gid: u32) -> impl Iterator<Item = &'a User> {
        self.config.users.iter().filter(move |u| u.is_member_of(gid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    fn config() -> DirectoryConfig {
        let mut alice = User::new("alice", 5001, 5501);
        alice.other_groups = vec![5502, 5502, 5501];
        let mut bob = User::new("bob", 5002, 5502);
        bob.other_groups = vec![9999];

        DirectoryConfig {
            backend: BackendConfig {
                base_dn: "dc=example,dc=com".to_string(),
                ..Default::default()
            },
            users: vec![alice, bob, User::new("ghost", 5003, 7777)],
            groups: vec![Group::new("staff", 5501), Group::new("admins", 5502)],
            ..Default::default()
        }
    }

    #[test]
    fn test_group_name_defaults_to_empty() {
        let config = config();
        let tree = config.tree();
        let resolver = GroupResolver::new(&config, &tree);

        assert_eq!(resolver.group_name(5501), "staff");
        assert_eq!(resolver.group_name(7777), "");
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let config = config();
        let tree = config.tree();
        let resolver = GroupResolver::new(&config, &tree);

        assert!(resolver.resolve_group("staff").is_some());
        assert!(resolver.resolve_group("Staff").is_none());
        assert!(resolver.resolve_user("Alice").is_none());
    }

    #[test]
    fn test_member_dns_are_deduplicated() {
        let config = config();
        let tree = config.tree();
        let resolver = GroupResolver::new(&config, &tree);

        assert_eq!(
            resolver.member_dns(5502),
            vec![
                "cn=alice,ou=staff,dc=example,dc=com".to_string(),
                "cn=bob,ou=admins,dc=example,dc=com".to_string(),
            ]
        );
        assert_eq!(
            resolver.member_dns(5501),
            vec!["cn=alice,ou=staff,dc=example,dc=com".to_string()]
        );
    }

    #[test]
    fn test_member_uids() {
        let config = config();
        let tree = config.tree();
        let resolver = GroupResolver::new(&config, &tree);

        assert_eq!(resolver.member_uids(5502), vec!["alice", "bob"]);
        assert_eq!(resolver.member_uids(7777), vec!["ghost"]);
    }

    #[test]
    fn test_orphan_user_dn_has_empty_ou() {
        let config = config();
        let tree = config.tree();
        let resolver = GroupResolver::new(&config, &tree);

        assert_eq!(resolver.member_dns(7777), vec!["cn=ghost,ou=,dc=example,dc=com"]);
    }

    #[test]
    fn test_group_dns_skip_unknown_ids() {
        let config = config();
        let tree = config.tree();
        let resolver = GroupResolver::new(&config, &tree);

        assert_eq!(
            resolver.group_dns_for(&[5502, 9999, 5502]),
            vec!["cn=admins,ou=groups,dc=example,dc=com".to_string()]
        );
        assert!(resolver.group_dns_for(&[]).is_empty());
    }
}
