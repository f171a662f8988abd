//! Top bar with the brand link and session-aware navigation.

use leptos::prelude::*;

use crate::pages::{DASHBOARD_ROUTE, HOME_ROUTE, LOGIN_ROUTE, SIGNUP_ROUTE};
use crate::state::session::{AppSession, SessionPhase};

#[component]
pub fn SiteHeader() -> impl IntoView {
    let session = expect_context::<AppSession>();

    view! {
        <header class="site-header">
            <a href=HOME_ROUTE class="site-header__brand">"NearBuy"</a>
            <nav class="site-header__nav">
                {move || match session.session().phase() {
                    SessionPhase::Authenticated(user) => {
                        let name = user.full_name.clone();
                        view! {
                            <span class="site-header__user">{name}</span>
                            <a href=DASHBOARD_ROUTE class="button">"Dashboard"</a>
                        }
                            .into_any()
                    }
                    SessionPhase::Unknown => view! { <span class="site-header__user"></span> }.into_any(),
                    SessionPhase::Anonymous => {
                        view! {
                            <a href=LOGIN_ROUTE class="site-header__link">"Login"</a>
                            <a href=SIGNUP_ROUTE class="button">"Sign Up"</a>
                        }
                            .into_any()
                    }
                }}
            </nav>
        </header>
    }
}
