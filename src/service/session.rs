//! Login sessions

use crate::core::acl::AccessControlList;
use crate::core::models::{EntityId, Named, User, name_key};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// An authenticated user with the ACL derived at login (or last refresh)
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub user: User,
    pub acl: Arc<dyn AccessControlList>,
    pub created_at: DateTime<Utc>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(user: User, acl: Arc<dyn AccessControlList>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            acl,
            created_at: Utc::now(),
            refreshed_at: None,
        }
    }

    pub(super) fn refreshed(&self, user: User, acl: Arc<dyn AccessControlList>) -> Self {
        Self {
            id: self.id,
            user,
            acl,
            created_at: self.created_at,
            refreshed_at: Some(Utc::now()),
        }
    }
}

/// Concurrent session table keyed by session id
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<Uuid, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session, returning the user's open session count
    pub fn insert(&self, session: Session) -> usize {
        let user = session.user.id();
        self.sessions.insert(session.id, session);
        self.count_for(user)
    }

    /// Overwrite a session only if it is still open
    pub fn replace(&self, session: Session) -> bool {
        match self.sessions.get_mut(&session.id) {
            Some(mut entry) => {
                *entry = session;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<Session> {
        self.sessions.get(&id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, id: Uuid) -> Option<Session> {
        self.sessions.remove(&id).map(|(_, session)| session)
    }

    /// Remove all sessions whose user name matches case-insensitively
    pub fn remove_user_name(&self, name: &str) -> usize {
        let key = name_key(name);
        let mut removed = 0;
        self.sessions.retain(|_, session| {
            let keep = session.user.name_key() != key;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    pub fn count_for(&self, user: EntityId) -> usize {
        self.sessions
            .iter()
            .filter(|entry| entry.value().user.id() == user)
            .count()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
