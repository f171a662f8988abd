//! Route guards driven by the session phase.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages that require (or forbid) a signed-in user install one of these
//! effects instead of checking the session ad hoc. Neither guard acts while
//! the startup session check is still loading.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::pages::{DASHBOARD_ROUTE, LOGIN_ROUTE};
use crate::state::session::{AppSession, Session, SessionPhase};

/// True once the session check finished without finding a user.
pub fn should_redirect_unauth(session: &Session) -> bool {
    session.phase() == SessionPhase::Anonymous
}

/// True once the session check finished and a user is signed in.
pub fn should_redirect_authed(session: &Session) -> bool {
    !session.loading && session.is_authenticated()
}

/// Redirect to the login view whenever the session resolves as anonymous.
pub fn install_unauth_redirect<F>(session: AppSession, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&session.session()) {
            navigate(LOGIN_ROUTE, NavigateOptions::default());
        }
    });
}

/// Redirect to the dashboard whenever a signed-in user lands here.
pub fn install_authed_redirect<F>(session: AppSession, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    Effect::new(move || {
        if should_redirect_authed(&session.session()) {
            navigate(DASHBOARD_ROUTE, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
