//! Turbine model: roles are held within groups

#[cfg(test)]
mod tests {
    use crate::common::{AclAssertions, TestGraph};
    use aclgraph::core::acl::TurbineAclFactory;
    use aclgraph::core::model_manager::ModelManager;
    use aclgraph::{ModelKind, SecurityConfig};

    #[test]
    fn test_same_role_in_two_groups() {
        let graph = TestGraph::new(ModelKind::Turbine);
        let alice = graph.user("alice");
        let paris = graph.group("paris");
        let berlin = graph.group("berlin");
        graph.group("madrid");
        let manager_role = graph.role_with("manager", &["approve"]);
        let turbine = graph.service.turbine().unwrap();

        turbine.grant(&alice, &paris, &manager_role).unwrap();
        turbine.grant(&alice, &berlin, &manager_role).unwrap();

        let acl = graph.acl(&alice);
        assert!(acl.has_role("manager").unwrap());
        assert!(acl.has_role_in("manager", "paris").unwrap());
        assert!(acl.has_role_in("manager", "Berlin").unwrap());
        assert!(!acl.has_role_in("manager", "madrid").unwrap());
        acl.assert_groups(&["paris", "berlin"]);
        acl.assert_roles(&["manager"]);
    }

    #[test]
    fn test_permissions_scoped_by_group() {
        let graph = TestGraph::new(ModelKind::Turbine);
        let alice = graph.user("alice");
        let paris = graph.group("paris");
        let berlin = graph.group("berlin");
        let manager_role = graph.role_with("manager", &["approve", "read"]);
        let clerk = graph.role_with("clerk", &["file"]);
        let turbine = graph.service.turbine().unwrap();

        turbine.grant(&alice, &paris, &manager_role).unwrap();
        turbine.grant(&alice, &berlin, &clerk).unwrap();

        let acl = graph.acl(&alice);
        acl.assert_permissions(&["approve", "read", "file"]);
        assert!(acl.has_permission_in("approve", "paris").unwrap());
        assert!(!acl.has_permission_in("approve", "berlin").unwrap());
        assert!(acl.has_permission_in("file", "berlin").unwrap());
        assert_eq!(acl.permissions_in("paris").unwrap().len(), 2);
        assert!(acl.roles_in("madrid").unwrap().is_empty());
        assert!(acl.has_permission_in_any("file", &["paris", "berlin"]).unwrap());
    }

    #[test]
    fn test_blank_group_is_rejected() {
        let graph = TestGraph::new(ModelKind::Turbine);
        let alice = graph.user("alice");
        let acl = graph.acl(&alice);
        assert!(acl.has_role_in("manager", "").unwrap_err().is_access_control());
        assert!(acl.roles_in("").unwrap_err().is_access_control());
    }

    #[test]
    fn test_grant_is_idempotent_and_revocable() {
        let graph = TestGraph::new(ModelKind::Turbine);
        let alice = graph.user("alice");
        let paris = graph.group("paris");
        let manager_role = graph.role("manager");
        let turbine = graph.service.turbine().unwrap();

        assert!(turbine.grant(&alice, &paris, &manager_role).unwrap());
        assert!(!turbine.grant(&alice, &paris, &manager_role).unwrap());
        assert_eq!(graph.reload(&alice).user_group_roles.len(), 1);

        assert!(turbine.revoke(&alice, &paris, &manager_role).unwrap());
        assert!(!turbine.revoke(&alice, &paris, &manager_role).unwrap());
        assert!(!graph.acl(&alice).has_role("manager").unwrap());
    }

    #[test]
    fn test_global_group_created_on_demand() {
        let graph = TestGraph::with_config(SecurityConfig {
            model: ModelKind::Turbine,
            global_group: "everyone".to_string(),
            ..SecurityConfig::default()
        });
        let turbine = graph.service.turbine().unwrap();
        assert_eq!(turbine.global_group_name(), "everyone");
        assert!(!graph.service.groups().check_exists("everyone").unwrap());

        let first = turbine.global_group().unwrap();
        let second = turbine.global_group().unwrap();
        assert_eq!(first, second);
        assert!(graph.service.groups().check_exists("everyone").unwrap());
    }

    #[test]
    fn test_global_accessors() {
        let graph = TestGraph::new(ModelKind::Turbine);
        let alice = graph.user("alice");
        let paris = graph.group("paris");
        let member = graph.role_with("member", &["login"]);
        let manager_role = graph.role_with("manager", &["approve"]);
        let turbine = graph.service.turbine().unwrap();
        let global = turbine.global_group().unwrap();

        turbine.grant(&alice, &global, &member).unwrap();
        turbine.grant(&alice, &paris, &manager_role).unwrap();

        let factory = TurbineAclFactory::new(graph.store.clone(), "global");
        let acl = factory.build(&graph.reload(&alice)).unwrap();
        assert_eq!(acl.global_group(), "global");
        assert!(acl.has_global_role("member"));
        assert!(!acl.has_global_role("manager"));
        assert!(acl.has_global_permission("login"));
        assert_eq!(acl.global_roles().names(), vec!["member"]);
        assert_eq!(acl.global_permissions().names(), vec!["login"]);
    }

    #[test]
    fn test_replace_in_global_group() {
        let graph = TestGraph::new(ModelKind::Turbine);
        let alice = graph.user("alice");
        let junior = graph.role("junior");
        let senior = graph.role("senior");
        let turbine = graph.service.turbine().unwrap();
        let global = turbine.global_group().unwrap();
        turbine.grant(&alice, &global, &junior).unwrap();

        turbine.replace(&alice, &junior, &senior).unwrap();

        let acl = graph.acl(&alice);
        assert!(acl.has_role_in("senior", "global").unwrap());
        assert!(!acl.has_role("junior").unwrap());
    }

    #[test]
    fn test_replace_with_unknown_role_changes_nothing() {
        let graph = TestGraph::new(ModelKind::Turbine);
        let alice = graph.user("alice");
        let junior = graph.role("junior");
        let turbine = graph.service.turbine().unwrap();
        let global = turbine.global_group().unwrap();
        turbine.grant(&alice, &global, &junior).unwrap();

        let ghost = aclgraph::Role::new("ghost");
        let err = turbine.replace(&alice, &junior, &ghost).unwrap_err();
        assert!(err.is_unknown_entity());
        assert!(graph.acl(&alice).has_role_in("junior", "global").unwrap());
    }

    #[test]
    fn test_revoke_all_group() {
        let graph = TestGraph::new(ModelKind::Turbine);
        let alice = graph.user("alice");
        let bob = graph.user("bob");
        let paris = graph.group("paris");
        let berlin = graph.group("berlin");
        let manager_role = graph.role("manager");
        let turbine = graph.service.turbine().unwrap();

        turbine.grant(&alice, &paris, &manager_role).unwrap();
        turbine.grant(&bob, &paris, &manager_role).unwrap();
        turbine.grant(&bob, &berlin, &manager_role).unwrap();

        assert_eq!(turbine.revoke_all_for(&paris).unwrap(), 2);
        assert!(!graph.acl(&alice).has_role("manager").unwrap());
        assert!(graph.acl(&bob).has_role_in("manager", "berlin").unwrap());
    }
}
