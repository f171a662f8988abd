//! Nearby-shop search state and the geolocation-gated search flow.
//!
//! SYSTEM CONTEXT
//! ==============
//! The home page owns one `SearchFlow`. It asks the geolocator for a position
//! once on activation, then every search is sent with that position and a
//! fixed radius. Overlapping searches are not cancelled or de-duplicated.
//!
//! ERROR HANDLING
//! ==============
//! Failures never clear the displayed results; they only replace the status
//! message.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use leptos::logging::warn;

use super::{ClearOnDrop, StateCell};
use crate::net::api::{ApiRequest, NEARBY_SEARCH_PATH, Transport};
use crate::net::error::ClientError;
use crate::net::types::{Coordinates, SearchResult};
use crate::util::geo::Geolocator;

/// Search radius sent with every nearby query.
pub const SEARCH_RADIUS_KM: u32 = 5;

pub const GEOLOCATION_UNAVAILABLE_MESSAGE: &str = "Geolocation is not available. Please allow location access.";
pub const LOCATION_REQUIRED_MESSAGE: &str = "Please enable location services to search nearby shops.";
pub const SEARCH_FAILED_MESSAGE: &str = "An error occurred during search.";

/// View state of the search page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
    pub coordinates: Option<Coordinates>,
    pub results: Vec<SearchResult>,
    pub message: String,
    pub loading: bool,
    /// Bumped each time a response replaces `results`.
    pub generation: u64,
}

/// Build the `GET /search/nearby` request for `query` around `at`.
#[must_use]
pub fn nearby_request(query: &str, at: Coordinates) -> ApiRequest {
    ApiRequest::get(NEARBY_SEARCH_PATH)
        .with_query("q", query)
        .with_query("lat", at.latitude)
        .with_query("lon", at.longitude)
        .with_query("radius_km", SEARCH_RADIUS_KM)
}

#[derive(Clone)]
pub struct SearchFlow<T, G, C> {
    api: T,
    geo: G,
    state: C,
}

impl<T, G, C> SearchFlow<T, G, C>
where
    T: Transport,
    G: Geolocator,
    C: StateCell<SearchState>,
{
    pub fn new(api: T, geo: G, state: C) -> Self {
        Self { api, geo, state }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    /// Ask for the device position once. A failure leaves the position
    /// absent and explains why; there is no retry.
    pub async fn locate(&self) {
        match self.geo.current_position().await {
            Ok(position) => self.state.update_state(|s| s.coordinates = Some(position)),
            Err(e) => {
                warn!("Geolocation error: {e}");
                self.state.update_state(|s| s.message = GEOLOCATION_UNAVAILABLE_MESSAGE.to_owned());
            }
        }
    }

    /// Run one nearby search. Without a position no request is sent.
    pub async fn search(&self, query: &str) {
        let position = self.state.with_state(|s| s.coordinates);
        self.state.update_state(|s| s.message.clear());

        let Some(position) = position else {
            self.state.update_state(|s| s.message = LOCATION_REQUIRED_MESSAGE.to_owned());
            return;
        };

        self.state.update_state(|s| s.loading = true);
        let _loading = ClearOnDrop::new(|| self.state.update_state(|s| s.loading = false));

        match self.fetch_nearby(query, position).await {
            Ok((results, message)) => self.state.update_state(|s| {
                s.results = results;
                s.message = message;
                s.generation += 1;
            }),
            Err(e) => {
                warn!("Search failed: {e}");
                let message = e.server_message().unwrap_or(SEARCH_FAILED_MESSAGE).to_owned();
                self.state.update_state(|s| s.message = message);
            }
        }
    }

    async fn fetch_nearby(&self, query: &str, at: Coordinates) -> Result<(Vec<SearchResult>, String), ClientError> {
        let resp = self.api.send(nearby_request(query, at)).await?;
        if !resp.is_success() {
            return Err(resp.into_request_error());
        }
        let results = resp.decode_payload::<Vec<SearchResult>>().map_err(|e| {
            warn!("malformed search results: {e}");
            ClientError::Request { status: resp.status, message: String::new() }
        })?;
        Ok((results, resp.message().unwrap_or_default().to_owned()))
    }
}
