//! Home page: nearby-shop search around the device position.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public route. The position is requested once when the page hydrates; each
//! submit runs one search through `SearchFlow`.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::components::shop_card::ShopCard;
use crate::components::site_header::SiteHeader;
use crate::net::api::HttpTransport;
use crate::net::types::SearchResult;
use crate::state::search::{SearchFlow, SearchState};
use crate::util::geo::BrowserGeolocator;

type PageSearch = SearchFlow<HttpTransport, BrowserGeolocator, RwSignal<SearchState>>;

/// Render key for one result row: `(response generation, position)`.
pub type RowKey = (u64, usize);

/// Result rows keyed so that every new response re-renders every card.
pub fn keyed_results(state: &SearchState) -> Vec<(RowKey, SearchResult)> {
    state.results.iter().cloned().enumerate().map(|(index, result)| ((state.generation, index), result)).collect()
}

pub fn search_button_label(loading: bool) -> &'static str {
    if loading { "Searching..." } else { "Search Nearby" }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let state = RwSignal::new(SearchState::default());
    let query = RwSignal::new(String::new());
    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    let flow: PageSearch = SearchFlow::new(HttpTransport::from_build_env(), BrowserGeolocator, state);

    #[cfg(feature = "hydrate")]
    {
        let flow = flow.clone();
        leptos::task::spawn_local(async move { flow.locate().await });
    }

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        #[cfg(feature = "hydrate")]
        {
            let flow = flow.clone();
            let query = query.get_untracked();
            leptos::task::spawn_local(async move { flow.search(&query).await });
        }
    };

    let loading = move || state.with(|s| s.loading);
    let message = move || state.with(|s| s.message.clone());
    let results = move || state.with(keyed_results);

    view! {
        <div class="home-page">
            <SiteHeader/>
            <main class="home-main">
                <form class="search-form" on:submit=on_search>
                    <input
                        class="search-input"
                        type="text"
                        placeholder="Search for an item..."
                        prop:value=move || query.get()
                        on:input=move |ev| query.set(event_target_value(&ev))
                    />
                    <button class="button" type="submit" disabled=loading>
                        {move || search_button_label(loading())}
                    </button>
                </form>
                <Show when=move || !message().is_empty()>
                    <p class="search-message">{message}</p>
                </Show>
                <div class="shop-grid">
                    <For
                        each=results
                        key=|(key, _)| *key
                        children=|(_, result)| view! { <ShopCard result/> }
                    />
                </div>
            </main>
        </div>
    }
}
