//! Login page: email and password against the session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! A signed-in visitor is sent on to the dashboard once the startup session
//! check resolves. Credentials go through `AppSession::login`, which owns the
//! identity; this page only turns the outcome into navigation or a message.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::logging::warn;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::api::Transport;
use crate::net::error::ClientError;
use crate::net::types::LoginOutcome;
use crate::pages::SIGNUP_ROUTE;
use crate::state::session::{AppSession, Session, SessionStore};
use crate::state::{ClearOnDrop, StateCell};
use crate::util::auth::install_authed_redirect;

pub const LOGIN_REJECTED_MESSAGE: &str = "Login failed. Please check your credentials.";
pub const LOGIN_FAILED_MESSAGE: &str = "An unexpected error occurred.";

/// What the page does with a login result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginFeedback {
    Proceed,
    Show(&'static str),
}

pub fn login_feedback(result: &Result<Option<LoginOutcome>, ClientError>) -> LoginFeedback {
    match result {
        Ok(Some(_)) => LoginFeedback::Proceed,
        Ok(None) => LoginFeedback::Show(LOGIN_REJECTED_MESSAGE),
        Err(_) => LoginFeedback::Show(LOGIN_FAILED_MESSAGE),
    }
}

/// One login attempt. `busy(true)` is reported first and `busy(false)` on
/// every exit, including when the returned future is dropped.
pub async fn submit_login<T, C>(
    session: &SessionStore<T, C>,
    email: &str,
    password: &str,
    busy: impl Fn(bool),
) -> LoginFeedback
where
    T: Transport,
    C: StateCell<Session>,
{
    busy(true);
    let _busy = ClearOnDrop::new(|| busy(false));

    let result = session.login(email, password).await;
    if let Err(e) = &result {
        warn!("login request failed: {e}");
    }
    login_feedback(&result)
}

pub fn login_button_label(busy: bool) -> &'static str {
    if busy { "Logging In..." } else { "Log In" }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let navigate = use_navigate();
    install_authed_redirect(session.clone(), navigate.clone());

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        error.set(String::new());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            let navigate = navigate.clone();
            let email_value = email.get_untracked();
            let password_value = password.get_untracked();
            leptos::task::spawn_local(async move {
                match submit_login(&session, &email_value, &password_value, |on| busy.set(on)).await {
                    LoginFeedback::Proceed => {
                        navigate(crate::pages::DASHBOARD_ROUTE, leptos_router::NavigateOptions::default());
                    }
                    LoginFeedback::Show(message) => error.set(message.to_owned()),
                }
            });
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Log In"</h1>
                <p class="auth-card__subtitle">"Enter your email below to log in to your account."</p>
                <Show when=move || !error.get().is_empty()>
                    <p class="auth-error">{move || error.get()}</p>
                </Show>
                <form class="auth-form" on:submit=on_submit>
                    <label for="email">"Email"</label>
                    <input
                        id="email"
                        class="auth-input"
                        type="email"
                        placeholder="m@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        class="auth-input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="button auth-submit" type="submit" disabled=move || busy.get()>
                        {move || login_button_label(busy.get())}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Don't have an account? "
                    <a href=SIGNUP_ROUTE>"Sign up"</a>
                </p>
            </div>
        </div>
    }
}
