//! Auth-session store for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionStore` is built in `App` and provided through context. Route
//! guards and identity-aware components read it; only its three operations
//! (`check_session`, `login`, `logout`) write it.
//!
//! ERROR HANDLING
//! ==============
//! `check_session` swallows every failure (logged, identity cleared).
//! `login` absorbs HTTP rejections as `Ok(None)` but returns network failures
//! to the caller. `logout` always clears the identity.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::logging::{log, warn};
use leptos::prelude::RwSignal;
use serde::Deserialize;
use serde_json::json;

use super::{ClearOnDrop, StateCell};
use crate::net::api::{AUTH_CHECK_PATH, ApiRequest, ApiResponse, HttpTransport, LOGIN_PATH, LOGOUT_PATH, Transport};
use crate::net::error::ClientError;
use crate::net::types::{LoginOutcome, User};

/// Session store as wired into the browser app.
pub type AppSession = SessionStore<HttpTransport, RwSignal<Session>>;

/// Authenticated identity plus the initial-check loading flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub identity: Option<User>,
    pub loading: bool,
}

impl Default for Session {
    /// A fresh session is `Unknown`: loading until the startup check lands.
    fn default() -> Self {
        Self { identity: None, loading: true }
    }
}

/// Where the session sits in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase<'a> {
    Unknown,
    Anonymous,
    Authenticated(&'a User),
}

impl Session {
    #[must_use]
    pub fn phase(&self) -> SessionPhase<'_> {
        match (&self.identity, self.loading) {
            (Some(user), _) => SessionPhase::Authenticated(user),
            (None, true) => SessionPhase::Unknown,
            (None, false) => SessionPhase::Anonymous,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

/// Owner of the process-wide [`Session`].
#[derive(Clone)]
pub struct SessionStore<T, C> {
    api: T,
    state: C,
    checked: Arc<AtomicBool>,
}

impl<T, C> SessionStore<T, C>
where
    T: Transport,
    C: StateCell<Session>,
{
    pub fn new(api: T, state: C) -> Self {
        Self { api, state, checked: Arc::new(AtomicBool::new(false)) }
    }

    /// Snapshot of the current session. Tracked when backed by a signal.
    pub fn session(&self) -> Session {
        self.state.with_state(Clone::clone)
    }

    pub fn identity(&self) -> Option<User> {
        self.state.with_state(|s| s.identity.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.state.with_state(|s| s.loading)
    }

    /// Resolve the startup identity from the session cookie.
    ///
    /// Runs at most once per store; later calls return immediately. Never
    /// fails: any error leaves the session anonymous. `loading` is cleared
    /// on every exit path.
    pub async fn check_session(&self) {
        if self.checked.swap(true, Ordering::SeqCst) {
            log!("session check already performed");
            return;
        }
        let _loading = ClearOnDrop::new(|| self.state.update_state(|s| s.loading = false));

        match self.fetch_identity().await {
            Ok(user) => self.state.update_state(|s| s.identity = Some(user)),
            Err(e) => {
                warn!("Auth check failed: {e}");
                self.state.update_state(|s| s.identity = None);
            }
        }
    }

    /// Send credentials and adopt the returned identity.
    ///
    /// Returns `Ok(None)` without touching the session when the backend
    /// rejects the login.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] when no response was received.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<LoginOutcome>, ClientError> {
        let request = ApiRequest::post(LOGIN_PATH).with_json(json!({ "email": email, "password": password }));
        let resp = self.api.send(request).await?;
        if !resp.is_success() {
            warn!("login rejected: status {}", resp.status);
            return Ok(None);
        }

        let message = resp.message().unwrap_or_default().to_owned();
        let identity = match identity_from(&resp) {
            Some(user) => user,
            // Cookie-only login answers carry no identity; ask for it.
            None => match self.fetch_identity().await {
                Ok(user) => user,
                Err(ClientError::Network(reason)) => return Err(ClientError::Network(reason)),
                Err(e) => {
                    warn!("login accepted but identity lookup failed: {e}");
                    return Ok(None);
                }
            },
        };

        self.state.update_state(|s| s.identity = Some(identity.clone()));
        Ok(Some(LoginOutcome { message, identity }))
    }

    /// End the server session and forget the identity, whatever the
    /// server answers.
    pub async fn logout(&self) {
        match self.api.send(ApiRequest::post(LOGOUT_PATH)).await {
            Ok(resp) if !resp.is_success() => warn!("logout returned status {}", resp.status),
            Ok(_) => {}
            Err(e) => warn!("logout request failed: {e}"),
        }
        self.state.update_state(|s| s.identity = None);
    }

    async fn fetch_identity(&self) -> Result<User, ClientError> {
        let resp = self.api.send(ApiRequest::get(AUTH_CHECK_PATH)).await?;
        if !resp.is_success() {
            return Err(ClientError::Auth { status: resp.status, message: resp.error_message().unwrap_or_default() });
        }
        resp.decode_payload::<User>()
            .map_err(|e| ClientError::Auth { status: resp.status, message: format!("malformed identity: {e}") })
    }
}

/// Identity carried by a login answer: the envelope `body` itself, or an
/// `identity` member of the body or of the top-level object.
fn identity_from(resp: &ApiResponse) -> Option<User> {
    let candidates = [Some(resp.payload()), resp.payload().get("identity"), resp.json.get("identity")];
    candidates.into_iter().flatten().find_map(|v| User::deserialize(v).ok())
}
