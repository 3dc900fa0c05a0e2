//! In-memory session state
//!
//! The session record is mutated through pure transition functions and
//! shared through a cloneable handle. Every mutation persists through the
//! token store, so a restarted process rehydrates to the last state.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use super::models::User;
use super::store::TokenStore;

/// The authoritative client-side auth record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_fetching: bool,
    pub error: Option<String>,
}

/// Session state transitions
#[derive(Debug, Clone)]
pub enum SessionAction {
    SetUser(Option<User>),
    SetFetching(bool),
    SetError(Option<String>),
    Logout,
}

/// Apply a transition. Pure; `is_authenticated` is always derived from
/// `user`, never set independently.
pub fn apply_session_action(session: AuthSession, action: SessionAction) -> AuthSession {
    match action {
        SessionAction::SetUser(user) => AuthSession {
            is_authenticated: user.is_some(),
            user,
            error: None,
            ..session
        },
        SessionAction::SetFetching(is_fetching) => AuthSession {
            is_fetching,
            ..session
        },
        SessionAction::SetError(error) => AuthSession { error, ..session },
        SessionAction::Logout => AuthSession::default(),
    }
}

/// Shared, dependency-injected session handle
#[derive(Clone)]
pub struct SessionHandle {
    state: Arc<RwLock<AuthSession>>,
    store: TokenStore,
}

impl SessionHandle {
    /// Hydrate the session from the persisted record
    pub fn new(store: TokenStore) -> Self {
        let initial = store.load();
        Self {
            state: Arc::new(RwLock::new(initial)),
            store,
        }
    }

    /// Current state, cloned out of the lock
    pub fn snapshot(&self) -> AuthSession {
        self.state.read().unwrap().clone()
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Apply a transition and persist the result. `Logout` removes the
    /// persisted record instead of rewriting it with defaults.
    pub fn dispatch(&self, action: SessionAction) {
        let is_logout = matches!(action, SessionAction::Logout);

        let next = {
            let mut state = self.state.write().unwrap();
            *state = apply_session_action(state.clone(), action);
            state.clone()
        };

        if is_logout {
            self.store.clear();
        } else {
            self.store.save(&next);
        }
    }

    pub fn set_user(&self, user: Option<User>) {
        self.dispatch(SessionAction::SetUser(user));
    }

    pub fn set_fetching(&self, is_fetching: bool) {
        self.dispatch(SessionAction::SetFetching(is_fetching));
    }

    pub fn set_error(&self, error: Option<String>) {
        self.dispatch(SessionAction::SetError(error));
    }

    pub fn logout(&self) {
        self.dispatch(SessionAction::Logout);
    }
}
