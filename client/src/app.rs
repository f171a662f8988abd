//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::net::api::HttpTransport;
use crate::pages::{
    dashboard::DashboardPage, home::HomePage, login::LoginPage, not_found::NotFoundPage, signup::SignupPage,
};
use crate::state::session::{AppSession, Session, SessionStore};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the single session store, provides it to every route and starts
/// the one-time session check in the browser.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session: AppSession = SessionStore::new(HttpTransport::from_build_env(), RwSignal::new(Session::default()));
    provide_context(session.clone());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move { session.check_session().await });

    view! {
        <Stylesheet id="leptos" href="/pkg/nearbuy-ui.css"/>
        <Title text="NearBuy"/>

        <Router>
            <Routes fallback=NotFoundPage>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("signup") view=SignupPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
            </Routes>
        </Router>
    }
}
