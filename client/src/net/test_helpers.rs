//! Scripted collaborators shared by flow tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::api::{ApiRequest, ApiResponse, Transport};
use super::error::ClientError;
use super::types::{Coordinates, Role, User};
use crate::util::geo::Geolocator;

// =========================================================================
// ScriptedTransport
// =========================================================================

#[derive(Default)]
struct Script {
    replies: VecDeque<Result<ApiResponse, ClientError>>,
    requests: Vec<ApiRequest>,
}

/// Replays queued replies in order and records every request sent.
/// Clones share the same script.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    inner: Rc<RefCell<Script>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, status: u16, json: Value) {
        self.inner.borrow_mut().replies.push_back(Ok(ApiResponse::new(status, json)));
    }

    pub(crate) fn fail_network(&self, reason: &str) {
        self.inner.borrow_mut().replies.push_back(Err(ClientError::Network(reason.to_owned())));
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.inner.borrow().requests.clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.inner.borrow().requests.len()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let mut script = self.inner.borrow_mut();
        script.requests.push(request);
        script
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Network("no scripted reply".to_owned())))
    }
}

// =========================================================================
// CountingGeolocator
// =========================================================================

/// Geolocator that answers with a fixed result and counts lookups.
#[derive(Clone)]
pub(crate) struct CountingGeolocator {
    result: Result<Coordinates, ClientError>,
    calls: Rc<Cell<usize>>,
}

impl CountingGeolocator {
    pub(crate) fn at(latitude: f64, longitude: f64) -> Self {
        Self { result: Ok(Coordinates { latitude, longitude }), calls: Rc::default() }
    }

    pub(crate) fn denied() -> Self {
        Self {
            result: Err(ClientError::CapabilityUnavailable("permission denied".to_owned())),
            calls: Rc::default(),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait(?Send)]
impl Geolocator for CountingGeolocator {
    async fn current_position(&self) -> Result<Coordinates, ClientError> {
        self.calls.set(self.calls.get() + 1);
        self.result.clone()
    }
}

// =========================================================================
// Fixtures
// =========================================================================

pub(crate) fn shopper() -> User {
    User {
        id: "u-1".to_owned(),
        full_name: "Asha Das".to_owned(),
        email: "asha@example.com".to_owned(),
        role: Role::User,
    }
}

pub(crate) fn shopper_json() -> Value {
    json!({ "id": "u-1", "fullName": "Asha Das", "email": "asha@example.com", "role": "USER" })
}

pub(crate) fn hit(shop_id: &str, shop_name: &str) -> Value {
    json!({ "document": { "shop_id": shop_id, "shopName": shop_name, "address": "Bhubaneswar" } })
}
