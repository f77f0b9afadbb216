//! Entity lifecycle through the service's managers

#[cfg(test)]
mod tests {
    use crate::common::TestGraph;
    use crate::common::fixtures::PASSWORD;
    use aclgraph::{AuthenticatorKind, EntityKind, ModelKind, Named, SecurityError};

    #[test]
    fn test_add_and_lookup() {
        let graph = TestGraph::new(ModelKind::Dynamic);
        let staff = graph.group("Staff");

        let groups = graph.service.groups();
        assert_eq!(groups.get_by_name("staff").unwrap(), staff);
        assert_eq!(groups.get_by_id(staff.id()).unwrap().name(), "Staff");
        assert!(groups.check_exists("STAFF").unwrap());
        assert!(groups.check_exists_id(staff.id()).unwrap());
        assert!(groups.get_by_name("missing").unwrap_err().is_unknown_entity());
    }

    #[test]
    fn test_blank_name_rejected() {
        let graph = TestGraph::new(ModelKind::Dynamic);
        let err = graph.service.roles().add("  ").unwrap_err();
        assert!(matches!(err, SecurityError::DataBackend(_)));
        assert_eq!(graph.store.count(EntityKind::Role), 0);
    }

    #[test]
    fn test_all_in_creation_order() {
        let graph = TestGraph::new(ModelKind::Dynamic);
        for name in ["write", "read", "delete"] {
            graph.permission(name);
        }
        assert_eq!(
            graph.service.permissions().all().unwrap().names(),
            vec!["write", "read", "delete"]
        );
    }

    #[test]
    fn test_rename() {
        let graph = TestGraph::new(ModelKind::Dynamic);
        let editor = graph.role("editor");
        graph.role("viewer");
        let roles = graph.service.roles();

        let renamed = roles.rename(&editor, "author").unwrap();
        assert_eq!(renamed.id(), editor.id());
        assert!(!roles.check_exists("editor").unwrap());

        assert!(roles.rename(&renamed, "Viewer").unwrap_err().is_entity_exists());
        assert_eq!(roles.rename(&renamed, "AUTHOR").unwrap().name(), "AUTHOR");
    }

    #[test]
    fn test_remove_cascades_grants() {
        let graph = TestGraph::new(ModelKind::Dynamic);
        let alice = graph.user("alice");
        let staff = graph.group("staff");
        let editor = graph.role_with("editor", &["write"]);
        let manager = graph.service.dynamic().unwrap();
        manager.grant_group(&alice, &staff).unwrap();
        manager.grant_group_role(&staff, &editor).unwrap();
        manager.grant_role(&alice, &editor).unwrap();

        assert_eq!(graph.service.roles().remove(&editor).unwrap(), 3);
        assert!(!graph.service.roles().check_exists("editor").unwrap());

        let acl = graph.acl(&alice);
        assert!(!acl.has_role("editor").unwrap());
        assert!(acl.is_in_group("staff"));
    }

    #[test]
    fn test_user_passwords() {
        let graph = TestGraph::new(ModelKind::Basic);
        let alice = graph.user("alice");
        let users = graph.service.users();

        assert!(users.authenticate(&graph.reload(&alice), PASSWORD).is_ok());
        let err = users.authenticate(&graph.reload(&alice), "nope").unwrap_err();
        assert!(matches!(err, SecurityError::PasswordMismatch(_)));

        assert!(users.change_password(&alice, "nope", "next").is_err());
        users.change_password(&alice, PASSWORD, "next").unwrap();
        assert!(users.get_user_with_password("alice", "next").is_ok());

        users.force_password(&alice, "forced").unwrap();
        let logged_in = users.get_user_with_password("alice", "forced").unwrap();
        assert!(logged_in.last_login.is_some());
        assert!(graph.reload(&alice).last_login.is_some());
    }

    #[test]
    fn test_argon2_passwords_are_hashed() {
        let graph = TestGraph::with_authenticator(ModelKind::Basic, AuthenticatorKind::Argon2);
        let alice = graph.user("alice");
        let stored = graph.reload(&alice).password.unwrap();
        assert!(stored.starts_with("$argon2"));
        assert!(graph.service.users().get_user_with_password("alice", PASSWORD).is_ok());
    }

    #[test]
    fn test_noop_accepts_anything() {
        let graph = TestGraph::with_authenticator(ModelKind::Basic, AuthenticatorKind::Noop);
        graph.user("alice");
        assert!(graph.service.users().get_user_with_password("alice", "whatever").is_ok());
    }

    #[test]
    fn test_anonymous_user() {
        let graph = TestGraph::new(ModelKind::Basic);
        let anonymous = graph.service.users().anonymous_user();
        assert!(anonymous.is_anonymous());
        assert!(!graph.user("alice").is_anonymous());
        assert!(graph.service.access_control_list(&anonymous).unwrap_err().is_unknown_entity());
    }
}
