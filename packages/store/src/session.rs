//! # Session store — single authority for the signed-in user
//!
//! Holds the atomic (user record, access token, refresh token) triple. A
//! non-`None` access token always implies a non-`None` user: the three values
//! are persisted, installed and cleared together, so a reload never observes
//! partial state.
//!
//! Mutations write to the [`LocalStore`] before updating in-memory state and
//! notify subscribers afterwards. Views consume the store through
//! [`SessionStore::snapshot`] and re-render via [`SessionStore::subscribe`]
//! rather than polling.
//!
//! Navigation is modelled as returned [`NavRequest`] values instead of a
//! router side effect, which keeps the exactly-once redirect guarantee of
//! [`SessionStore::expire`] testable.

use std::sync::{Arc, Mutex};

use crate::models::UserProfile;
use crate::storage::{keys, load_json, save_json, LocalStore};

/// A navigation intent emitted by a store operation, applied by the shell.
#[derive(Clone, Debug, PartialEq)]
pub struct NavRequest {
    /// Route target, e.g. `"/login"`.
    pub target: String,
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
    /// Optional explanatory message to show on arrival.
    pub message: Option<String>,
}

impl NavRequest {
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            replace: false,
            message: None,
        }
    }

    pub fn replacing(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            replace: true,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Point-in-time view of the session triple.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSnapshot {
    pub user: Option<UserProfile>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

type Subscriber = Box<dyn Fn(&SessionSnapshot) + Send>;

/// Owner of the current session; all session mutations go through here.
#[derive(Clone)]
pub struct SessionStore<S: LocalStore> {
    store: S,
    state: Arc<Mutex<SessionSnapshot>>,
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl<S: LocalStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: Arc::new(Mutex::new(SessionSnapshot::default())),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Restore a persisted session at startup.
    ///
    /// Adopts the triple only when the user record and both tokens are all
    /// present and the user record parses. Anything less — a missing token, a
    /// corrupt record — clears every persisted session key and starts
    /// unauthenticated. Callers must await this before rendering dependent
    /// views so the UI never flashes an unauthenticated state.
    pub async fn restore(&self) {
        let user: Option<UserProfile> = load_json(&self.store, keys::USER).await;
        let access = self.store.get(keys::ACCESS_TOKEN).await;
        let refresh = self.store.get(keys::REFRESH_TOKEN).await;

        match (user, access, refresh) {
            (Some(user), Some(access), Some(refresh)) => {
                self.set_state(SessionSnapshot {
                    user: Some(user),
                    access_token: Some(access),
                    refresh_token: Some(refresh),
                });
            }
            _ => {
                self.clear_persisted().await;
                self.set_state(SessionSnapshot::default());
            }
        }
    }

    /// Install a new session and request navigation to `redirect_target`
    /// (defaulting to the site root), replacing the history entry.
    pub async fn login(
        &self,
        user: UserProfile,
        access_token: String,
        refresh_token: String,
        redirect_target: Option<&str>,
    ) -> NavRequest {
        self.install(user, access_token, refresh_token).await;
        NavRequest::replacing(redirect_target.unwrap_or("/"))
    }

    /// Replace the session triple without navigating (token refresh path).
    pub async fn install(&self, user: UserProfile, access_token: String, refresh_token: String) {
        save_json(&self.store, keys::USER, &user).await;
        self.store.put(keys::ACCESS_TOKEN, access_token.clone()).await;
        self.store.put(keys::REFRESH_TOKEN, refresh_token.clone()).await;
        self.set_state(SessionSnapshot {
            user: Some(user),
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
        });
    }

    /// Clear persisted and in-memory session state unconditionally and
    /// request navigation to the login screen.
    pub async fn logout(&self) -> NavRequest {
        self.clear_persisted().await;
        self.set_state(SessionSnapshot::default());
        NavRequest::to("/login")
    }

    /// Session-expiry handling for 401/403 responses.
    ///
    /// Clears the session like [`logout`](Self::logout), but is idempotent:
    /// the redirect is returned only when a session was actually cleared, so
    /// several authenticated calls failing at once redirect exactly once.
    /// The in-memory triple is taken under the lock before any await, so an
    /// expire racing another expire across a yielding store still finds the
    /// session already cleared.
    pub async fn expire(&self, message: &str) -> Option<NavRequest> {
        let taken = std::mem::take(&mut *self.state.lock().unwrap());
        if taken.user.is_none() && taken.access_token.is_none() {
            return None;
        }
        self.set_state(SessionSnapshot::default());
        self.clear_persisted().await;
        Some(NavRequest::replacing("/login").with_message(message))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.lock().unwrap().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.lock().unwrap().is_authenticated()
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.lock().unwrap().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.state.lock().unwrap().refresh_token.clone()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.lock().unwrap().user.clone()
    }

    /// Register a callback invoked after every session change.
    pub fn subscribe(&self, callback: impl Fn(&SessionSnapshot) + Send + 'static) {
        self.subscribers.lock().unwrap().push(Box::new(callback));
    }

    fn set_state(&self, next: SessionSnapshot) {
        *self.state.lock().unwrap() = next.clone();
        for subscriber in self.subscribers.lock().unwrap().iter() {
            subscriber(&next);
        }
    }

    async fn clear_persisted(&self) {
        self.store.remove(keys::USER).await;
        self.store.remove(keys::ACCESS_TOKEN).await;
        self.store.remove(keys::REFRESH_TOKEN).await;
    }
}
