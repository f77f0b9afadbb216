//! Sessions hold the snapshot taken at login

#[cfg(test)]
mod tests {
    use crate::common::TestGraph;
    use crate::common::fixtures::PASSWORD;
    use aclgraph::{ModelKind, Named};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_session_lifecycle() {
        let graph = TestGraph::new(ModelKind::Turbine);
        let alice = graph.user("alice");
        let paris = graph.group("paris");
        let manager_role = graph.role("manager");
        let turbine = graph.service.turbine().unwrap();
        turbine.grant(&alice, &paris, &manager_role).unwrap();

        let session = graph.service.login("alice", PASSWORD).unwrap();
        assert_eq!(session.acl.user().id, alice.id());
        assert!(session.acl.has_role_in("manager", "paris").unwrap());

        turbine.revoke(&alice, &paris, &manager_role).unwrap();
        let stale = graph.service.session(session.id).unwrap();
        assert!(stale.acl.has_role("manager").unwrap());

        let fresh = graph.service.refresh(session.id).unwrap();
        assert!(!fresh.acl.has_role("manager").unwrap());

        assert!(graph.service.logout(session.id));
        assert!(graph.service.sessions().is_empty());
    }

    #[test]
    fn test_refresh_follows_rename() {
        let graph = TestGraph::new(ModelKind::Dynamic);
        let alice = graph.user("alice");
        let session = graph.service.login("alice", PASSWORD).unwrap();

        graph.service.users().rename(&alice, "alicia").unwrap();
        let refreshed = graph.service.refresh(session.id).unwrap();
        assert_eq!(refreshed.user.name(), "alicia");
        assert_eq!(refreshed.acl.user().name(), "alicia");
    }

    #[test]
    fn test_invalidate_after_admin_change() {
        let graph = TestGraph::new(ModelKind::Dynamic);
        graph.user("alice");
        graph.user("bob");
        let first = graph.service.login("alice", PASSWORD).unwrap();
        let second = graph.service.login("Alice", PASSWORD).unwrap();
        graph.service.login("bob", PASSWORD).unwrap();
        assert_ne!(first.id, second.id);

        assert_eq!(graph.service.invalidate_user("alice"), 2);
        assert!(graph.service.session(first.id).is_none());
        assert!(graph.service.session(second.id).is_none());
        assert_eq!(graph.service.sessions().len(), 1);
    }

    #[test]
    fn test_concurrent_logins() {
        let graph = Arc::new(TestGraph::new(ModelKind::Dynamic));
        graph.user("alice");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let graph = Arc::clone(&graph);
                thread::spawn(move || graph.service.login("alice", PASSWORD).unwrap().id)
            })
            .collect();
        let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(graph.service.sessions().len(), ids.len());
        let alice = graph.service.users().get_user("alice").unwrap();
        assert_eq!(graph.service.sessions().count_for(alice.id()), 8);
    }
}
