//! Read-only access to the signed-in user's identity.
//!
//! `DeckService` asks a `Session` for the current user id whenever a call is
//! scoped to "me". The session itself is owned and mutated by the caller
//! (sign-in/out flows); services only read it.

use std::sync::{Arc, PoisonError, RwLock};

use crate::types::{User, UserId};

pub trait Session {
    /// Id of the signed-in user, or `None` when nobody is signed in.
    fn current_user_id(&self) -> Option<UserId>;
}

impl<S: Session + ?Sized> Session for &S {
    fn current_user_id(&self) -> Option<UserId> {
        (**self).current_user_id()
    }
}

impl<S: Session + ?Sized> Session for Arc<S> {
    fn current_user_id(&self) -> Option<UserId> {
        (**self).current_user_id()
    }
}

/// Shared holder for the signed-in user.
#[derive(Debug, Default)]
pub struct SessionStore {
    user: RwLock<Option<User>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }

    pub fn login(&self, user: User) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    pub fn logout(&self) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn user(&self) -> Option<User> {
        self.user.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Session for SessionStore {
    fn current_user_id(&self) -> Option<UserId> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|user| user.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User {
            id: 42,
            username: "alice".to_string(),
        }
    }

    #[test]
    fn empty_store_has_no_user() {
        assert_eq!(SessionStore::new().current_user_id(), None);
    }

    #[test]
    fn login_then_logout() {
        let store = SessionStore::new();
        store.login(alice());
        assert_eq!(store.current_user_id(), Some(42));
        assert_eq!(store.user().map(|u| u.username), Some("alice".to_string()));
        store.logout();
        assert_eq!(store.current_user_id(), None);
    }

    #[test]
    fn shared_handle_sees_later_login() {
        let store = Arc::new(SessionStore::new());
        let handle = Arc::clone(&store);
        store.login(alice());
        assert_eq!(handle.current_user_id(), Some(42));
    }
}
