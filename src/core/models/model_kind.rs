//! The three authorization topologies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Active RBAC model, chosen once at configuration time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Users belong to groups; the group is the permission-bearing unit
    Basic,
    /// Users hold roles directly or through groups; roles own permissions
    #[default]
    Dynamic,
    /// Roles are assigned to users per group through a join entity
    Turbine,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Basic => write!(f, "basic"),
            ModelKind::Dynamic => write!(f, "dynamic"),
            ModelKind::Turbine => write!(f, "turbine"),
        }
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(ModelKind::Basic),
            "dynamic" => Ok(ModelKind::Dynamic),
            "turbine" => Ok(ModelKind::Turbine),
            _ => Err(format!("Invalid model: {}", s)),
        }
    }
}
