//! Fallback page for unknown routes.

use leptos::prelude::*;

use crate::pages::HOME_ROUTE;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <h1 class="not-found-page__code">"404"</h1>
            <h2>"Page Not Found"</h2>
            <p>"The page you're looking for doesn't exist."</p>
            <a href=HOME_ROUTE class="button">"Go to Home"</a>
        </div>
    }
}
