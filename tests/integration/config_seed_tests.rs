//! Configuration files and seed graphs

#[cfg(test)]
mod tests {
    use crate::common::AclAssertions;
    use aclgraph::service::SeedGraph;
    use aclgraph::{AuthenticatorKind, Config, ModelKind, SecurityError, SecurityService};
    use std::fs;
    use tempfile::TempDir;

    const TURBINE_SEED: &str = r#"
users:
  - name: alice
    password: secret
  - name: bob
    password: hunter2
groups: [paris, berlin]
roles: [manager, clerk]
permissions: [approve, file]
grants:
  - { user: alice, group: paris, role: manager }
  - { user: bob, group: berlin, role: clerk }
  - { user: bob, role: clerk }
  - { role: manager, permission: approve }
  - { role: clerk, permission: file }
"#;

    fn write_config(dir: &TempDir, config: &str, seed: Option<&str>) -> std::path::PathBuf {
        if let Some(seed) = seed {
            fs::write(dir.path().join("seed.yaml"), seed).unwrap();
        }
        let path = dir.path().join("aclgraph.yaml");
        fs::write(&path, config).unwrap();
        path
    }

    #[test]
    fn test_service_from_config_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "security:\n  model: turbine\n  global_group: everyone\n  seed: seed.yaml\n",
            Some(TURBINE_SEED),
        );

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.security.model, ModelKind::Turbine);
        assert_eq!(config.security.authenticator, AuthenticatorKind::TextMatch);

        let service = SecurityService::from_config(&config).unwrap();
        let alice = service.access_control_list_for("alice").unwrap();
        assert!(alice.has_role_in("manager", "paris").unwrap());
        alice.assert_permissions(&["approve"]);

        let bob = service.access_control_list_for("bob").unwrap();
        assert!(bob.has_role_in("clerk", "everyone").unwrap());
        assert!(bob.has_role_in("clerk", "berlin").unwrap());
        bob.assert_groups(&["berlin", "everyone"]);
    }

    #[test]
    fn test_missing_seed_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "security:\n  seed: absent.yaml\n", None);
        let config = Config::from_file(&path).unwrap();

        let err = SecurityService::from_config(&config).unwrap_err();
        assert!(matches!(err, SecurityError::Config(_)));
    }

    #[test]
    fn test_seed_grant_unsupported_by_model() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "security:\n  model: dynamic\n  seed: seed.yaml\n",
            Some(TURBINE_SEED),
        );
        let config = Config::from_file(&path).unwrap();

        let err = SecurityService::from_config(&config).unwrap_err();
        assert!(err.is_access_control());
        assert!(err.to_string().contains("user-group-role"));
    }

    #[test]
    fn test_seed_round_trips_through_yaml() {
        let graph = SeedGraph::from_yaml(TURBINE_SEED).unwrap();
        assert_eq!(graph.users.len(), 2);
        assert_eq!(graph.grants.len(), 5);
        graph.validate().unwrap();

        let yaml = serde_yaml::to_string(&graph).unwrap();
        assert_eq!(SeedGraph::from_yaml(&yaml).unwrap(), graph);
    }

    #[test]
    fn test_config_rejects_unknown_authenticator() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "security:\n  authenticator: ldap\n", None);
        assert!(matches!(Config::from_file(&path), Err(SecurityError::Config(_))));
    }
}
