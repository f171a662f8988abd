//! Signup page: role selector plus shared and vendor-only fields.
//!
//! SYSTEM CONTEXT
//! ==============
//! Registration never signs the visitor in. On success the server message is
//! shown in an alert and the page moves on to the login view.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::api::HttpTransport;
use crate::net::types::Role;
use crate::pages::LOGIN_ROUTE;
use crate::state::session::AppSession;
use crate::state::signup::{SignupFlow, SignupState, field};
use crate::util::auth::install_authed_redirect;

type PageSignup = SignupFlow<HttpTransport, RwSignal<SignupState>>;

/// Input descriptor: `(field id, label, input type)`.
type FieldSpec = (&'static str, &'static str, &'static str);

const SHARED_FIELDS: [FieldSpec; 3] = [
    (field::FULL_NAME, "Full Name", "text"),
    (field::EMAIL, "Email", "email"),
    (field::PASSWORD, "Password", "password"),
];

const VENDOR_FIELDS: [FieldSpec; 3] = [
    (field::SHOP_NAME, "Shop Name", "text"),
    (field::ADDRESS, "Shop Address", "text"),
    (field::CONTACT, "Contact", "tel"),
];

/// Inputs rendered for `role`, in display order.
pub fn visible_fields(role: Role) -> Vec<FieldSpec> {
    let mut fields = SHARED_FIELDS.to_vec();
    if role == Role::Vendor {
        fields.extend(VENDOR_FIELDS);
    }
    fields
}

pub fn signup_button_label(busy: bool) -> &'static str {
    if busy { "Signing Up..." } else { "Sign Up" }
}

#[component]
fn FormField(state: RwSignal<SignupState>, spec: FieldSpec) -> impl IntoView {
    let (id, label, kind) = spec;
    view! {
        <label for=id>{label}</label>
        <input
            id=id
            class="auth-input"
            type=kind
            prop:value=move || state.with(|s| s.form.field(id).to_owned())
            on:input=move |ev| {
                let value = event_target_value(&ev);
                state.update(|s| s.form.set_field(id, value));
            }
        />
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let navigate = use_navigate();
    install_authed_redirect(session, navigate.clone());

    let state = RwSignal::new(SignupState::default());
    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    let flow: PageSignup = SignupFlow::new(HttpTransport::from_build_env(), state);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if state.with_untracked(|s| s.busy) {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let flow = flow.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                if let Some(message) = flow.submit().await {
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message(&message);
                    }
                    navigate(LOGIN_ROUTE, leptos_router::NavigateOptions::default());
                }
            });
        }
    };

    let on_role = move |ev: leptos::ev::Event| {
        if let Ok(role) = event_target_value(&ev).parse::<Role>() {
            state.update(|s| s.form.set_role(role));
        }
    };

    let role = move || state.with(|s| s.form.role);
    let error = move || state.with(|s| s.error.clone());
    let busy = move || state.with(|s| s.busy);

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign Up"</h1>
                <p class="auth-card__subtitle">"Choose your account type and fill in the details."</p>
                <Show when=move || !error().is_empty()>
                    <p class="auth-error">{error}</p>
                </Show>
                <form class="auth-form" on:submit=on_submit>
                    <label for="role">"Account Type"</label>
                    <select id="role" class="auth-input" on:change=on_role prop:value=move || role().as_str()>
                        <option value=Role::User.as_str()>{Role::User.label()}</option>
                        <option value=Role::Vendor.as_str()>{Role::Vendor.label()}</option>
                    </select>
                    {move || {
                        visible_fields(role())
                            .into_iter()
                            .map(|spec| view! { <FormField state spec/> })
                            .collect_view()
                    }}
                    <button class="button auth-submit" type="submit" disabled=busy>
                        {move || signup_button_label(busy())}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Already have an account? "
                    <a href=LOGIN_ROUTE>"Log in"</a>
                </p>
            </div>
        </div>
    }
}
