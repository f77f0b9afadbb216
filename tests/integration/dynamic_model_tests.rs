//! Dynamic model: direct roles, group roles and delegation

#[cfg(test)]
mod tests {
    use crate::common::{AclAssertions, TestGraph};
    use aclgraph::core::acl::DynamicAclFactory;
    use aclgraph::core::model_manager::ModelManager;
    use aclgraph::{ModelKind, Named};

    #[test]
    fn test_direct_roles_expand_to_permissions() {
        let graph = TestGraph::new(ModelKind::Dynamic);
        let alice = graph.user("alice");
        let editor = graph.role_with("editor", &["read", "write"]);
        let manager = graph.service.dynamic().unwrap();

        manager.grant_role(&alice, &editor).unwrap();

        let acl = graph.acl(&alice);
        assert!(acl.has_role("editor").unwrap());
        assert!(acl.has_role("Editor").unwrap());
        acl.assert_roles(&["editor"]);
        acl.assert_permissions(&["read", "write"]);
        assert!(!acl.has_permission("delete").unwrap());
    }

    #[test]
    fn test_group_roles_count_for_members() {
        let graph = TestGraph::new(ModelKind::Dynamic);
        let alice = graph.user("alice");
        let staff = graph.group("staff");
        let viewer = graph.role_with("viewer", &["read"]);
        let auditor = graph.role_with("auditor", &["audit"]);
        let manager = graph.service.dynamic().unwrap();

        manager.grant_group(&alice, &staff).unwrap();
        manager.grant_group_role(&staff, &viewer).unwrap();
        manager.grant_role(&alice, &auditor).unwrap();

        let acl = graph.acl(&alice);
        acl.assert_roles(&["viewer", "auditor"]);
        acl.assert_permissions(&["read", "audit"]);
        assert!(acl.has_role_in("viewer", "staff").unwrap());
        assert!(!acl.has_role_in("auditor", "staff").unwrap());
        assert!(acl.has_permission_in("read", "staff").unwrap());
        assert!(!acl.has_permission_in("audit", "staff").unwrap());
        assert!(acl.roles_in("unknown").unwrap().is_empty());
        assert!(acl.has_role_in_any("viewer", &["other", "staff"]).unwrap());
    }

    #[test]
    fn test_blank_group_is_rejected() {
        let graph = TestGraph::new(ModelKind::Dynamic);
        let alice = graph.user("alice");
        let acl = graph.acl(&alice);
        assert!(acl.has_role_in("viewer", "").unwrap_err().is_access_control());
        assert!(acl.permissions_in("  ").unwrap_err().is_access_control());
    }

    #[test]
    fn test_revoke_group_role_drops_inherited_role() {
        let graph = TestGraph::new(ModelKind::Dynamic);
        let alice = graph.user("alice");
        let staff = graph.group("staff");
        let viewer = graph.role_with("viewer", &["read"]);
        let manager = graph.service.dynamic().unwrap();
        manager.grant_group(&alice, &staff).unwrap();
        manager.grant_group_role(&staff, &viewer).unwrap();

        assert!(manager.revoke_group_role(&staff, &viewer).unwrap());
        let acl = graph.acl(&alice);
        assert!(!acl.has_role("viewer").unwrap());
        assert!(acl.is_in_group("staff"));
    }

    #[test]
    fn test_delegation_is_transitive() {
        let graph = TestGraph::new(ModelKind::Dynamic);
        let alice = graph.user("alice");
        let bob = graph.user("bob");
        let carol = graph.user("carol");
        let admin = graph.role_with("admin", &["manage"]);
        let manager = graph.service.dynamic().unwrap();

        manager.grant_role(&alice, &admin).unwrap();
        assert!(manager.add_delegate(&alice, &bob).unwrap());
        assert!(!manager.add_delegate(&alice, &bob).unwrap());
        manager.add_delegate(&bob, &carol).unwrap();

        let acl = graph.acl(&carol);
        assert!(acl.has_role("admin").unwrap());
        assert!(acl.has_permission("manage").unwrap());

        let factory = DynamicAclFactory::new(graph.store.clone());
        let snapshot = factory.build(&graph.reload(&carol)).unwrap();
        let mut delegators = snapshot.delegators().names();
        delegators.sort();
        assert_eq!(delegators, vec!["alice", "bob"]);
    }

    #[test]
    fn test_delegation_cycle_terminates() {
        let graph = TestGraph::new(ModelKind::Dynamic);
        let alice = graph.user("alice");
        let bob = graph.user("bob");
        let editor = graph.role_with("editor", &["write"]);
        let viewer = graph.role_with("viewer", &["read"]);
        let manager = graph.service.dynamic().unwrap();

        manager.grant_role(&alice, &editor).unwrap();
        manager.grant_role(&bob, &viewer).unwrap();
        manager.add_delegate(&alice, &bob).unwrap();
        manager.add_delegate(&bob, &alice).unwrap();

        graph.acl(&alice).assert_roles(&["editor", "viewer"]);
        graph.acl(&bob).assert_roles(&["viewer", "editor"]);
    }

    #[test]
    fn test_remove_delegate_is_strict() {
        let graph = TestGraph::new(ModelKind::Dynamic);
        let alice = graph.user("alice");
        let bob = graph.user("bob");
        let manager = graph.service.dynamic().unwrap();

        assert!(manager.remove_delegate(&alice, &bob).unwrap_err().is_unknown_entity());

        manager.add_delegate(&alice, &bob).unwrap();
        manager.remove_delegate(&alice, &bob).unwrap();
        assert!(graph.reload(&bob).delegators.is_empty());
        assert!(graph.reload(&alice).delegatees.is_empty());
    }

    #[test]
    fn test_removing_last_permission_keeps_role() {
        let graph = TestGraph::new(ModelKind::Dynamic);
        let alice = graph.user("alice");
        let editor = graph.role_with("editor", &["write"]);
        let manager = graph.service.dynamic().unwrap();
        manager.grant_role(&alice, &editor).unwrap();

        let write = graph.service.permissions().get_by_name("write").unwrap();
        manager.revoke_permission(&editor, &write).unwrap();

        let acl = graph.acl(&alice);
        assert!(acl.has_role("editor").unwrap());
        assert!(!acl.has_permission("write").unwrap());
        assert!(acl.permissions().unwrap().is_empty());
    }

    #[test]
    fn test_revoke_all_role() {
        let graph = TestGraph::new(ModelKind::Dynamic);
        let alice = graph.user("alice");
        let staff = graph.group("staff");
        let editor = graph.role_with("editor", &["write", "read"]);
        let manager = graph.service.dynamic().unwrap();
        manager.grant_role(&alice, &editor).unwrap();
        manager.grant_group_role(&staff, &editor).unwrap();

        // user-role, group-role and two role-permission edges
        assert_eq!(manager.revoke_all_for(&editor).unwrap(), 4);
        assert!(graph.reload(&alice).roles.is_empty());
        assert_eq!(graph.store.edge_count(), 0);
    }

    #[test]
    fn test_roles_are_copies() {
        let graph = TestGraph::new(ModelKind::Dynamic);
        let alice = graph.user("alice");
        let editor = graph.role_with("editor", &[]);
        graph.service.dynamic().unwrap().grant_role(&alice, &editor).unwrap();

        let acl = graph.acl(&alice);
        let mut roles = acl.roles().unwrap();
        roles.clear();
        assert!(acl.has_role("editor").unwrap());
        assert_eq!(acl.roles().unwrap().len(), 1);
        assert_eq!(acl.user().name(), "alice");
    }
}
