//! Session lifecycle: the single source of truth for "who is logged in".
//!
//! `SessionManager` owns the in-memory session and the persisted copy, and
//! hands the transport layer two closures: a credential provider read on
//! every outgoing request, and an unauthorized handler fired on any 401.
//! The coupling is explicit injection rather than a shared mutable default
//! header.

use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use crate::api::{CredentialProvider, UnauthorizedHandler};
use crate::models::User;

use super::store::{SessionStore, TOKEN_KEY, USER_KEY};

/// Read-only view of the current session.
///
/// Invariant: once `is_loading` is false, `user` and `token` are either
/// both present or both absent.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_loading: bool,
}

impl Session {
    fn empty() -> Self {
        Self {
            user: None,
            token: None,
            is_loading: true,
        }
    }
}

struct SessionInner {
    state: RwLock<Session>,
    store: Box<dyn SessionStore>,
}

impl SessionInner {
    /// Shared teardown used by both explicit logout and the 401 path.
    /// Storage is cleared even when no session is live.
    fn clear(&self) {
        {
            let mut state = self.state.write().expect("session lock poisoned");
            state.user = None;
            state.token = None;
        }
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
    }
}

#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

impl SessionManager {
    /// Create a manager over the given storage area. The session starts
    /// empty and loading; call [`restore`](Self::restore) once at startup.
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                state: RwLock::new(Session::empty()),
                store,
            }),
        }
    }

    /// Restore a persisted session, if one exists and is well-formed.
    ///
    /// Never fails: a missing or corrupt persisted session is the same as
    /// "never logged in". Always finishes with `is_loading` false.
    pub fn restore(&self) {
        let token = self.inner.store.read(TOKEN_KEY);
        let user = self
            .inner
            .store
            .read(USER_KEY)
            .and_then(|raw| match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    debug!(error = %e, "persisted user record is malformed, ignoring");
                    None
                }
            });

        let mut state = self.inner.state.write().expect("session lock poisoned");
        match (token, user) {
            (Some(token), Some(user)) => {
                info!(user = %user.name, role = %user.role, "session restored");
                state.token = Some(token);
                state.user = Some(user);
            }
            _ => {
                state.token = None;
                state.user = None;
            }
        }
        state.is_loading = false;
    }

    /// Install a freshly authenticated identity. Overwrites any previous
    /// session, in memory and on disk.
    pub fn login(&self, user: User, token: String) {
        info!(user = %user.name, role = %user.role, "logged in");
        self.inner.store.write(TOKEN_KEY, &token);
        match serde_json::to_string(&user) {
            Ok(raw) => self.inner.store.write(USER_KEY, &raw),
            Err(e) => debug!(error = %e, "could not serialize user record"),
        }

        let mut state = self.inner.state.write().expect("session lock poisoned");
        state.user = Some(user);
        state.token = Some(token);
        state.is_loading = false;
    }

    /// Drop the session. Safe to call when already logged out; persisted
    /// entries are removed regardless.
    pub fn logout(&self) {
        info!("logged out");
        self.inner.clear();
    }

    pub fn snapshot(&self) -> Session {
        self.inner.state.read().expect("session lock poisoned").clone()
    }

    pub fn user(&self) -> Option<User> {
        self.inner
            .state
            .read()
            .expect("session lock poisoned")
            .user
            .clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner
            .state
            .read()
            .expect("session lock poisoned")
            .token
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Closure the transport consults on every outgoing request. Reads the
    /// live session, so login/logout take effect without rewiring.
    pub fn credential_provider(&self) -> CredentialProvider {
        let inner = self.inner.clone();
        Arc::new(move || {
            inner
                .state
                .read()
                .expect("session lock poisoned")
                .token
                .clone()
        })
    }

    /// Closure the transport fires on any 401. Clears the session before
    /// the rejected result reaches the original caller.
    pub fn unauthorized_handler(&self) -> UnauthorizedHandler {
        let inner = self.inner.clone();
        Arc::new(move || {
            debug!("clearing session after credential rejection");
            inner.clear();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::MemoryStore;
    use crate::models::Role;

    fn test_user() -> User {
        User {
            id: 1,
            name: "Ada Obi".into(),
            email: None,
            role: Role::Admin,
        }
    }

    /// Store adapter so tests keep a second handle for inspecting
    /// persisted entries.
    struct Shared(Arc<MemoryStore>);

    impl SessionStore for Shared {
        fn read(&self, key: &str) -> Option<String> {
            self.0.read(key)
        }
        fn write(&self, key: &str, value: &str) {
            self.0.write(key, value)
        }
        fn remove(&self, key: &str) {
            self.0.remove(key)
        }
    }

    fn manager_with_store() -> (SessionManager, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let manager = SessionManager::new(Box::new(Shared(store.clone())));
        (manager, store)
    }

    #[test]
    fn test_restore_with_no_persisted_state() {
        let (manager, _store) = manager_with_store();
        assert!(manager.snapshot().is_loading);

        manager.restore();
        let session = manager.snapshot();
        assert!(!session.is_loading);
        assert!(session.user.is_none());
        assert!(session.token.is_none());
    }

    #[test]
    fn test_restore_with_valid_persisted_state() {
        let (manager, store) = manager_with_store();
        store.write(TOKEN_KEY, "tok-xyz");
        store.write(USER_KEY, &serde_json::to_string(&test_user()).unwrap());

        manager.restore();
        let session = manager.snapshot();
        assert!(!session.is_loading);
        assert_eq!(session.token.as_deref(), Some("tok-xyz"));
        assert_eq!(session.user.unwrap().name, "Ada Obi");
    }

    #[test]
    fn test_restore_with_malformed_user_json() {
        let (manager, store) = manager_with_store();
        store.write(TOKEN_KEY, "tok-xyz");
        store.write(USER_KEY, "{not json");

        manager.restore();
        let session = manager.snapshot();
        assert!(!session.is_loading);
        assert!(session.user.is_none());
        // Both-or-none: a token without a readable user is no session
        assert!(session.token.is_none());
    }

    #[test]
    fn test_restore_with_token_but_no_user() {
        let (manager, store) = manager_with_store();
        store.write(TOKEN_KEY, "tok-orphan");

        manager.restore();
        let session = manager.snapshot();
        assert!(session.token.is_none());
        assert!(session.user.is_none());
    }

    #[test]
    fn test_login_persists_and_restore_round_trips() {
        let (manager, store) = manager_with_store();
        manager.login(test_user(), "tok-abc".into());

        assert!(manager.is_authenticated());
        assert_eq!(store.read(TOKEN_KEY).as_deref(), Some("tok-abc"));
        assert!(store.read(USER_KEY).is_some());

        // A fresh manager over the same store sees the same session
        let restored = SessionManager::new(Box::new(Shared(store.clone())));
        restored.restore();
        assert_eq!(restored.token().as_deref(), Some("tok-abc"));
        assert_eq!(restored.user().unwrap().id, 1);
    }

    #[test]
    fn test_login_overwrites_previous_session() {
        let (manager, store) = manager_with_store();
        manager.login(test_user(), "tok-one".into());
        let second = User {
            id: 2,
            name: "Kofi".into(),
            email: None,
            role: Role::Patient,
        };
        manager.login(second, "tok-two".into());

        assert_eq!(manager.token().as_deref(), Some("tok-two"));
        assert_eq!(manager.user().unwrap().id, 2);
        assert_eq!(store.read(TOKEN_KEY).as_deref(), Some("tok-two"));
    }

    #[test]
    fn test_logout_clears_memory_and_storage() {
        let (manager, store) = manager_with_store();
        manager.login(test_user(), "tok-abc".into());
        manager.logout();

        assert!(!manager.is_authenticated());
        assert!(manager.user().is_none());
        assert_eq!(store.read(TOKEN_KEY), None);
        assert_eq!(store.read(USER_KEY), None);

        // Logging out twice is a no-op, not an error
        manager.logout();
    }

    #[test]
    fn test_credential_provider_tracks_live_session() {
        let (manager, _store) = manager_with_store();
        let provider = manager.credential_provider();

        assert_eq!(provider(), None);
        manager.login(test_user(), "tok-live".into());
        assert_eq!(provider().as_deref(), Some("tok-live"));
        manager.logout();
        assert_eq!(provider(), None);
    }

    #[test]
    fn test_unauthorized_handler_clears_everything() {
        let (manager, store) = manager_with_store();
        manager.login(test_user(), "tok-abc".into());

        let handler = manager.unauthorized_handler();
        handler();

        assert!(manager.token().is_none());
        assert!(manager.user().is_none());
        assert_eq!(store.read(TOKEN_KEY), None);
        assert_eq!(store.read(USER_KEY), None);
    }
}
