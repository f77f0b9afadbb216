//! Audit events for authorization graph changes

use crate::core::models::{EntityKind, ModelKind};
use tracing::{debug, info, warn};

const MAX_FIELD_LEN: usize = 200;

/// Truncate caller-supplied text to keep audit lines bounded
fn safe(value: &str) -> String {
    value.chars().take(MAX_FIELD_LEN).collect()
}

/// Structured audit logging, emitted under the `security` target
pub struct SecurityLogger;

impl SecurityLogger {
    /// An edge was granted. `created` is false for an idempotent re-grant.
    pub fn log_grant(model: ModelKind, relation: &str, subject: &str, created: bool) {
        if created {
            info!(target: "security", model = %model, relation, subject = %safe(subject), "Grant applied");
        } else {
            debug!(target: "security", model = %model, relation, subject = %safe(subject), "Grant already present");
        }
    }

    /// An edge was revoked. `removed` is false when there was nothing to revoke.
    pub fn log_revoke(model: ModelKind, relation: &str, subject: &str, removed: bool) {
        if removed {
            info!(target: "security", model = %model, relation, subject = %safe(subject), "Grant revoked");
        } else {
            debug!(target: "security", model = %model, relation, subject = %safe(subject), "Nothing to revoke");
        }
    }

    pub fn log_revoke_all(model: ModelKind, kind: EntityKind, name: &str, removed: usize) {
        info!(target: "security", model = %model, kind = %kind, name = %safe(name), removed, "All grants revoked");
    }

    /// Entity lifecycle: `created`, `renamed`, `removed`
    pub fn log_entity_event(action: &str, kind: EntityKind, name: &str) {
        info!(target: "security", action, kind = %kind, name = %safe(name), "Entity {}", action);
    }

    pub fn log_auth_event(user: &str, success: bool, details: Option<&str>) {
        if success {
            info!(target: "security", user = %safe(user), "Authentication success");
        } else {
            warn!(
                target: "security",
                user = %safe(user),
                details = %details.map(safe).unwrap_or_default(),
                "Authentication failure"
            );
        }
    }

    pub fn log_session_event(action: &str, user: &str, sessions: usize) {
        info!(target: "security", action, user = %safe(user), sessions, "Session {}", action);
    }
}
