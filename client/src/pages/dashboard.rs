//! Dashboard page for signed-in users.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. Anonymous sessions are sent to
//! the login view once the startup check resolves; logging out clears the
//! identity, which trips the same redirect.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::site_header::SiteHeader;
use crate::net::types::{Role, User};
use crate::state::session::{AppSession, SessionPhase};
use crate::util::auth::install_unauth_redirect;

pub fn welcome_line(user: &User) -> String {
    format!("Welcome, {} ({})", user.full_name, user.role.label())
}

pub fn dashboard_title(role: Role) -> &'static str {
    match role {
        Role::Vendor => "Shop Dashboard",
        Role::User => "Dashboard",
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    install_unauth_redirect(session.clone(), use_navigate());

    let on_logout = {
        #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
        let session = session.clone();
        move |_: leptos::ev::MouseEvent| {
            #[cfg(feature = "hydrate")]
            {
                let session = session.clone();
                leptos::task::spawn_local(async move { session.logout().await });
            }
        }
    };

    view! {
        <div class="dashboard-page">
            <SiteHeader/>
            {move || match session.session().phase() {
                SessionPhase::Authenticated(user) => {
                    let title = dashboard_title(user.role);
                    let welcome = welcome_line(user);
                    let on_logout = on_logout.clone();
                    view! {
                        <main class="dashboard-main">
                            <div class="dashboard-main__header">
                                <h1>{title}</h1>
                                <span class="dashboard-main__welcome">{welcome}</span>
                                <button class="button" on:click=on_logout>"Logout"</button>
                            </div>
                            <p>"Search for items in shops around you from the home page."</p>
                        </main>
                    }
                        .into_any()
                }
                SessionPhase::Unknown => view! { <p class="dashboard-main">"Loading..."</p> }.into_any(),
                SessionPhase::Anonymous => {
                    view! { <p class="dashboard-main">"Redirecting to login..."</p> }.into_any()
                }
            }}
        </div>
    }
}
