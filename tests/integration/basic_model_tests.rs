//! Basic model: users belong to groups, nothing else

#[cfg(test)]
mod tests {
    use crate::common::{AclAssertions, TestGraph};
    use aclgraph::core::model_manager::ModelManager;
    use aclgraph::{ModelKind, SecurityError};

    #[test]
    fn test_group_membership_is_the_permission() {
        let graph = TestGraph::new(ModelKind::Basic);
        let alice = graph.user("alice");
        let staff = graph.group("staff");
        graph.group("admins");

        let manager = graph.service.basic().unwrap();
        assert!(manager.grant(&alice, &staff).unwrap());

        let acl = graph.acl(&alice);
        assert_eq!(acl.model(), ModelKind::Basic);
        assert!(acl.is_in_group("staff"));
        assert!(acl.is_in_group("STAFF"));
        assert!(acl.has_permission("staff").unwrap());
        assert!(!acl.has_permission("admins").unwrap());
        acl.assert_groups(&["staff"]);
    }

    #[test]
    fn test_role_queries_are_rejected() {
        let graph = TestGraph::new(ModelKind::Basic);
        let alice = graph.user("alice");
        let acl = graph.acl(&alice);

        let err = acl.has_role("editor").unwrap_err();
        assert!(matches!(err, SecurityError::AccessControl(_)));
        assert!(err.to_string().contains("basic model"));
        assert!(acl.has_role_in("editor", "staff").is_err());
        assert!(acl.roles().is_err());
        assert!(acl.roles_in("staff").is_err());
        assert!(acl.permissions().is_err());
        assert!(acl.has_permission_in("edit", "staff").is_err());
        assert!(acl.has_role_in_any("editor", &["a", "b"]).is_err());
    }

    #[test]
    fn test_user_without_groups() {
        let graph = TestGraph::new(ModelKind::Basic);
        let alice = graph.user("alice");
        let acl = graph.acl(&alice);
        assert!(acl.groups().is_empty());
        assert!(!acl.has_permission("anything").unwrap());
    }

    #[test]
    fn test_revoke_restores_state() {
        let graph = TestGraph::new(ModelKind::Basic);
        let alice = graph.user("alice");
        let staff = graph.group("staff");
        let manager = graph.service.basic().unwrap();

        manager.grant(&alice, &staff).unwrap();
        assert!(manager.revoke(&alice, &staff).unwrap());
        assert!(!graph.acl(&alice).is_in_group("staff"));

        // Revoking again is a no-op
        assert!(!manager.revoke(&alice, &staff).unwrap());
    }

    #[test]
    fn test_revoke_all_group() {
        let graph = TestGraph::new(ModelKind::Basic);
        let staff = graph.group("staff");
        let manager = graph.service.basic().unwrap();
        let users: Vec<_> = ["alice", "bob", "carol"]
            .iter()
            .map(|name| graph.user(name))
            .collect();
        for user in &users {
            manager.grant(user, &staff).unwrap();
        }

        assert_eq!(manager.revoke_all_for(&staff).unwrap(), 3);
        for user in &users {
            assert!(graph.reload(user).groups.is_empty());
        }
    }

    #[test]
    fn test_other_model_managers_unavailable() {
        let graph = TestGraph::new(ModelKind::Basic);
        assert!(graph.service.dynamic().unwrap_err().is_access_control());
        assert!(graph.service.turbine().unwrap_err().is_access_control());
    }
}
