//! Custom test assertions
//!
//! Domain-specific assertions for ACL snapshots.

use aclgraph::AccessControlList;

/// Assertions for ACL snapshots
pub trait AclAssertions {
    /// Assert the snapshot's roles are exactly `expected`, in any order
    fn assert_roles(&self, expected: &[&str]);

    /// Assert the snapshot's permissions are exactly `expected`, in any order
    fn assert_permissions(&self, expected: &[&str]);

    /// Assert the snapshot's groups are exactly `expected`, in any order
    fn assert_groups(&self, expected: &[&str]);
}

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

fn expected(names: &[&str]) -> Vec<String> {
    sorted(names.iter().map(|name| name.to_string()).collect())
}

impl<T: AccessControlList + ?Sized> AclAssertions for T {
    fn assert_roles(&self, names: &[&str]) {
        let roles = self.roles().expect("roles should be supported");
        assert_eq!(sorted(roles.names()), expected(names), "roles of {}", self.user());
    }

    fn assert_permissions(&self, names: &[&str]) {
        let permissions = self.permissions().expect("permissions should be supported");
        assert_eq!(
            sorted(permissions.names()),
            expected(names),
            "permissions of {}",
            self.user()
        );
    }

    fn assert_groups(&self, names: &[&str]) {
        assert_eq!(
            sorted(self.groups().names()),
            expected(names),
            "groups of {}",
            self.user()
        );
    }
}
