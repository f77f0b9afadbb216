//! Seed graphs
//!
//! A YAML document listing entities and grants, applied through the
//! managers at startup:
//!
//! ```yaml
//! users:
//!   - name: alice
//!     password: secret
//! groups: [staff]
//! roles: [editor]
//! permissions: [edit]
//! grants:
//!   - { user: alice, group: staff, role: editor }
//!   - { role: editor, permission: edit }
//! ```
//!
//! Which grant shapes are accepted depends on the active model.

use super::{ModelManagers, SecurityService};
use crate::core::models::{EntityKind, ModelKind, name_key};
use crate::utils::error::{Result, SecurityError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Entities and grants to create
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedGraph {
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub grants: Vec<SeedGrant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedUser {
    pub name: String,
    #[serde(default)]
    pub password: String,
}

/// One edge, named by the endpoints it connects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedGrant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegatee: Option<String>,
}

/// What applying a seed graph changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Entities created (existing ones are reused)
    pub entities: usize,
    /// Edges created (existing ones are left alone)
    pub grants: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GrantShape<'a> {
    UserGroupRole {
        user: &'a str,
        group: &'a str,
        role: &'a str,
    },
    UserGroup {
        user: &'a str,
        group: &'a str,
    },
    UserRole {
        user: &'a str,
        role: &'a str,
    },
    GroupRole {
        group: &'a str,
        role: &'a str,
    },
    RolePermission {
        role: &'a str,
        permission: &'a str,
    },
    Delegation {
        delegator: &'a str,
        delegatee: &'a str,
    },
}

impl fmt::Display for GrantShape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GrantShape::UserGroupRole { .. } => "user-group-role",
            GrantShape::UserGroup { .. } => "user-group",
            GrantShape::UserRole { .. } => "user-role",
            GrantShape::GroupRole { .. } => "group-role",
            GrantShape::RolePermission { .. } => "role-permission",
            GrantShape::Delegation { .. } => "delegation",
        };
        f.write_str(label)
    }
}

impl<'a> GrantShape<'a> {
    fn supported_by(&self, model: ModelKind) -> bool {
        match model {
            ModelKind::Basic => matches!(self, GrantShape::UserGroup { .. }),
            ModelKind::Dynamic => !matches!(self, GrantShape::UserGroupRole { .. }),
            ModelKind::Turbine => matches!(
                self,
                GrantShape::UserGroupRole { .. }
                    | GrantShape::UserRole { .. }
                    | GrantShape::RolePermission { .. }
            ),
        }
    }

    fn endpoints(&self) -> Vec<(EntityKind, &'a str)> {
        match *self {
            GrantShape::UserGroupRole { user, group, role } => vec![
                (EntityKind::User, user),
                (EntityKind::Group, group),
                (EntityKind::Role, role),
            ],
            GrantShape::UserGroup { user, group } => {
                vec![(EntityKind::User, user), (EntityKind::Group, group)]
            }
            GrantShape::UserRole { user, role } => {
                vec![(EntityKind::User, user), (EntityKind::Role, role)]
            }
            GrantShape::GroupRole { group, role } => {
                vec![(EntityKind::Group, group), (EntityKind::Role, role)]
            }
            GrantShape::RolePermission { role, permission } => {
                vec![(EntityKind::Role, role), (EntityKind::Permission, permission)]
            }
            GrantShape::Delegation {
                delegator,
                delegatee,
            } => vec![(EntityKind::User, delegator), (EntityKind::User, delegatee)],
        }
    }
}

impl SeedGrant {
    fn shape(&self) -> Result<GrantShape<'_>> {
        let shape = match (
            self.user.as_deref(),
            self.group.as_deref(),
            self.role.as_deref(),
            self.permission.as_deref(),
            self.delegator.as_deref(),
            self.delegatee.as_deref(),
        ) {
            (Some(user), Some(group), Some(role), None, None, None) => {
                GrantShape::UserGroupRole { user, group, role }
            }
            (Some(user), Some(group), None, None, None, None) => {
                GrantShape::UserGroup { user, group }
            }
            (Some(user), None, Some(role), None, None, None) => GrantShape::UserRole { user, role },
            (None, Some(group), Some(role), None, None, None) => {
                GrantShape::GroupRole { group, role }
            }
            (None, None, Some(role), Some(permission), None, None) => {
                GrantShape::RolePermission { role, permission }
            }
            (None, None, None, None, Some(delegator), Some(delegatee)) => {
                GrantShape::Delegation {
                    delegator,
                    delegatee,
                }
            }
            _ => {
                return Err(SecurityError::config(format!(
                    "Unrecognised grant: {:?}",
                    self
                )));
            }
        };
        Ok(shape)
    }
}

impl SeedGraph {
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| SecurityError::config(format!("Failed to parse seed graph: {}", e)))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading seed graph from: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| {
            SecurityError::config(format!("Failed to read seed graph {:?}: {}", path, e))
        })?;
        Self::from_yaml(&content)
    }

    /// Check every listed name is non-blank and every grant names a
    /// recognised shape
    pub fn validate(&self) -> Result<()> {
        for (kind, name) in self.listed() {
            if name.trim().is_empty() {
                return Err(SecurityError::config(format!(
                    "Seed graph lists a {} with a blank name",
                    kind
                )));
            }
        }
        for grant in &self.grants {
            grant.shape()?;
        }
        Ok(())
    }

    /// [`validate`](Self::validate), then check `model` accepts every grant shape
    pub fn validate_for(&self, model: ModelKind) -> Result<()> {
        self.validate()?;
        for grant in &self.grants {
            let shape = grant.shape()?;
            if !shape.supported_by(model) {
                return Err(unsupported(model, shape));
            }
        }
        Ok(())
    }

    fn listed(&self) -> Vec<(EntityKind, &str)> {
        let mut listed: Vec<_> = self
            .users
            .iter()
            .map(|user| (EntityKind::User, user.name.as_str()))
            .collect();
        for (kind, names) in [
            (EntityKind::Group, &self.groups),
            (EntityKind::Role, &self.roles),
            (EntityKind::Permission, &self.permissions),
        ] {
            listed.extend(names.iter().map(|name| (kind, name.as_str())));
        }
        listed
    }
}

/// Every grant endpoint is either listed in the graph or already stored
fn check_references(service: &SecurityService, graph: &SeedGraph) -> Result<()> {
    let listed: HashSet<(EntityKind, String)> = graph
        .listed()
        .into_iter()
        .map(|(kind, name)| (kind, name_key(name)))
        .collect();

    for grant in &graph.grants {
        for (kind, name) in grant.shape()?.endpoints() {
            if listed.contains(&(kind, name_key(name))) {
                continue;
            }
            if service.store().find_by_name(kind, name)?.is_none() {
                return Err(SecurityError::unknown_entity(format!("{} '{}'", kind, name)));
            }
        }
    }
    Ok(())
}

fn get_or_add<T>(
    exists: impl FnOnce() -> Result<bool>,
    get: impl FnOnce() -> Result<T>,
    add: impl FnOnce() -> Result<T>,
    created: &mut usize,
) -> Result<T> {
    if exists()? {
        get()
    } else {
        *created += 1;
        add()
    }
}

/// Nothing is written unless every grant is supported by the active model
/// and every endpoint resolves
pub(super) fn apply(service: &SecurityService, graph: &SeedGraph) -> Result<SeedSummary> {
    graph.validate_for(service.model())?;
    check_references(service, graph)?;
    let mut summary = SeedSummary::default();

    for user in &graph.users {
        let users = service.users();
        get_or_add(
            || users.check_exists(&user.name),
            || users.get_user(&user.name),
            || users.add_user(&user.name, &user.password),
            &mut summary.entities,
        )?;
    }
    for name in &graph.groups {
        let groups = service.groups();
        get_or_add(
            || groups.check_exists(name),
            || groups.get_by_name(name),
            || groups.add(name),
            &mut summary.entities,
        )?;
    }
    for name in &graph.roles {
        let roles = service.roles();
        get_or_add(
            || roles.check_exists(name),
            || roles.get_by_name(name),
            || roles.add(name),
            &mut summary.entities,
        )?;
    }
    for name in &graph.permissions {
        let permissions = service.permissions();
        get_or_add(
            || permissions.check_exists(name),
            || permissions.get_by_name(name),
            || permissions.add(name),
            &mut summary.entities,
        )?;
    }

    for grant in &graph.grants {
        if apply_grant(service, grant.shape()?)? {
            summary.grants += 1;
        }
    }

    Ok(summary)
}

/// Under Turbine a bare user-role grant lands in the global group
fn apply_grant(service: &SecurityService, shape: GrantShape<'_>) -> Result<bool> {
    let users = service.users();
    let groups = service.groups();
    let roles = service.roles();
    let permissions = service.permissions();

    match (service.model_managers(), shape) {
        (ModelManagers::Basic(m), GrantShape::UserGroup { user, group }) => {
            m.grant(&users.get_user(user)?, &groups.get_by_name(group)?)
        }
        (ModelManagers::Dynamic(m), GrantShape::UserGroup { user, group }) => {
            m.grant_group(&users.get_user(user)?, &groups.get_by_name(group)?)
        }
        (ModelManagers::Dynamic(m), GrantShape::UserRole { user, role }) => {
            m.grant_role(&users.get_user(user)?, &roles.get_by_name(role)?)
        }
        (ModelManagers::Dynamic(m), GrantShape::GroupRole { group, role }) => {
            m.grant_group_role(&groups.get_by_name(group)?, &roles.get_by_name(role)?)
        }
        (ModelManagers::Dynamic(m), GrantShape::RolePermission { role, permission }) => m
            .grant_permission(
                &roles.get_by_name(role)?,
                &permissions.get_by_name(permission)?,
            ),
        (
            ModelManagers::Dynamic(m),
            GrantShape::Delegation {
                delegator,
                delegatee,
            },
        ) => m.add_delegate(&users.get_user(delegator)?, &users.get_user(delegatee)?),
        (ModelManagers::Turbine(m), GrantShape::UserGroupRole { user, group, role }) => m.grant(
            &users.get_user(user)?,
            &groups.get_by_name(group)?,
            &roles.get_by_name(role)?,
        ),
        (ModelManagers::Turbine(m), GrantShape::UserRole { user, role }) => {
            let global = m.global_group()?;
            m.grant(&users.get_user(user)?, &global, &roles.get_by_name(role)?)
        }
        (ModelManagers::Turbine(m), GrantShape::RolePermission { role, permission }) => m
            .grant_permission(
                &roles.get_by_name(role)?,
                &permissions.get_by_name(permission)?,
            ),
        (managers, shape) => Err(unsupported(managers.model(), shape)),
    }
}

fn unsupported(model: ModelKind, shape: GrantShape<'_>) -> SecurityError {
    SecurityError::access_control(format!(
        "{} grants are not supported by the {} model",
        shape, model
    ))
}
