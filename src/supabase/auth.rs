//! Auth Collaborator
//!
//! The dashboard store never owns authentication; it only asks "who is the
//! current user?" at call time. This module provides that seam plus a
//! simple in-memory session holder for hosts that manage sign-in elsewhere.

use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use uuid::Uuid;

/// An authenticated user session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The user's unique identifier
    pub user_id: Uuid,
    /// Access token issued by the auth backend
    pub access_token: String,
}

/// Source of the current user identity, consulted at call time
pub trait SessionProvider: Send + Sync {
    /// Identifier of the currently signed-in user, if any
    fn current_user_id(&self) -> Option<Uuid>;
}

/// In-memory session holder
///
/// The host application sets the session after sign-in and clears it on
/// sign-out; the store reads it fresh on every operation.
#[derive(Default)]
pub struct SessionStore {
    session: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Create an empty session store (no user signed in)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session (for restoring after sign-in)
    pub fn set_session(&self, session: Session) {
        *self.session.write().unwrap() = Some(session);
    }

    /// Clear the session (sign-out)
    pub fn clear(&self) {
        *self.session.write().unwrap() = None;
    }

    /// Get a copy of the current session
    pub fn current_session(&self) -> Option<Session> {
        self.session.read().unwrap().clone()
    }
}

impl SessionProvider for SessionStore {
    fn current_user_id(&self) -> Option<Uuid> {
        self.session.read().unwrap().as_ref().map(|s| s.user_id)
    }
}

/// Fixed identity, useful for single-user hosts and tests
pub struct StaticSession(pub Uuid);

impl SessionProvider for StaticSession {
    fn current_user_id(&self) -> Option<Uuid> {
        Some(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_has_no_user() {
        let store = SessionStore::new();
        assert!(store.current_user_id().is_none());
        assert!(store.current_session().is_none());
    }

    #[test]
    fn test_set_and_clear_session() {
        let store = SessionStore::new();
        let user_id = Uuid::new_v4();

        store.set_session(Session {
            user_id,
            access_token: "token-abc".to_string(),
        });
        assert_eq!(store.current_user_id(), Some(user_id));
        assert_eq!(
            store.current_session().unwrap().access_token,
            "token-abc"
        );

        store.clear();
        assert!(store.current_user_id().is_none());
    }

    #[test]
    fn test_static_session() {
        let user_id = Uuid::new_v4();
        let session = StaticSession(user_id);
        assert_eq!(session.current_user_id(), Some(user_id));
    }
}
