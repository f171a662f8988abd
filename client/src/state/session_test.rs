use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;

use super::*;
use crate::net::api::Method;
use crate::net::test_helpers::{ScriptedTransport, shopper, shopper_json};

type TestStore = SessionStore<ScriptedTransport, Rc<RefCell<Session>>>;

fn store() -> (TestStore, ScriptedTransport) {
    let api = ScriptedTransport::new();
    let store = SessionStore::new(api.clone(), Rc::new(RefCell::new(Session::default())));
    (store, api)
}

fn authenticated() -> (TestStore, ScriptedTransport) {
    let (store, api) = store();
    store.state.update_state(|s| {
        s.identity = Some(shopper());
        s.loading = false;
    });
    (store, api)
}

// =============================================================
// Session / SessionPhase
// =============================================================

#[test]
fn fresh_session_is_unknown_and_loading() {
    let session = Session::default();
    assert!(session.loading);
    assert!(!session.is_authenticated());
    assert_eq!(session.phase(), SessionPhase::Unknown);
}

#[test]
fn phase_reflects_identity_once_loaded() {
    let user = shopper();
    let anonymous = Session { identity: None, loading: false };
    let signed_in = Session { identity: Some(user.clone()), loading: false };
    assert_eq!(anonymous.phase(), SessionPhase::Anonymous);
    assert_eq!(signed_in.phase(), SessionPhase::Authenticated(&user));
}

// =============================================================
// check_session
// =============================================================

#[tokio::test]
async fn check_session_success_sets_identity_and_clears_loading() {
    let (store, api) = store();
    api.respond(200, json!({ "message": "Session is valid.", "status": 200, "body": shopper_json() }));

    store.check_session().await;

    let session = store.session();
    assert_eq!(session.identity, Some(shopper()));
    assert!(!session.loading);
    assert_eq!(api.requests()[0].path, "/users/auth");
    assert_eq!(api.requests()[0].method, Method::Get);
}

#[tokio::test]
async fn check_session_http_failure_leaves_anonymous_and_clears_loading() {
    let (store, api) = store();
    api.respond(401, json!({ "message": "Unauthorized", "status": 401, "body": {} }));

    store.check_session().await;

    assert_eq!(store.identity(), None);
    assert!(!store.is_loading());
    assert_eq!(store.session().phase(), SessionPhase::Anonymous);
}

#[tokio::test]
async fn check_session_network_failure_clears_loading() {
    let (store, api) = store();
    api.fail_network("connection refused");

    store.check_session().await;

    assert_eq!(store.identity(), None);
    assert!(!store.is_loading());
}

#[tokio::test]
async fn check_session_malformed_identity_is_anonymous() {
    let (store, api) = store();
    api.respond(200, json!({ "message": "Session is valid.", "body": { "unexpected": true } }));

    store.check_session().await;

    assert_eq!(store.identity(), None);
    assert!(!store.is_loading());
}

#[tokio::test]
async fn check_session_runs_only_once() {
    let (store, api) = store();
    api.respond(200, json!({ "body": shopper_json() }));

    store.check_session().await;
    store.check_session().await;
    store.clone().check_session().await;

    assert_eq!(api.request_count(), 1);
}

struct StalledTransport;

#[async_trait::async_trait(?Send)]
impl Transport for StalledTransport {
    async fn send(&self, _request: ApiRequest) -> Result<crate::net::api::ApiResponse, ClientError> {
        std::future::pending().await
    }
}

#[test]
fn abandoned_check_session_still_clears_loading() {
    let store = SessionStore::new(StalledTransport, Rc::new(RefCell::new(Session::default())));
    let mut cx = std::task::Context::from_waker(std::task::Waker::noop());

    let mut fut = Box::pin(store.check_session());
    assert!(fut.as_mut().poll(&mut cx).is_pending());
    assert!(store.is_loading());

    drop(fut);
    assert!(!store.is_loading());
    assert_eq!(store.identity(), None);
}

// =============================================================
// login
// =============================================================

#[tokio::test]
async fn login_success_with_identity_in_envelope_body() {
    let (store, api) = store();
    store.state.update_state(|s| s.loading = false);
    api.respond(200, json!({ "message": "User logged in successfully", "status": 200, "body": shopper_json() }));

    let outcome = store.login("asha@example.com", "secret").await.unwrap().unwrap();

    assert_eq!(outcome.message, "User logged in successfully");
    assert_eq!(outcome.identity, shopper());
    assert_eq!(store.identity(), Some(shopper()));
    let sent = &api.requests()[0];
    assert_eq!(sent.path, "/users/login");
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.body, Some(json!({ "email": "asha@example.com", "password": "secret" })));
}

#[tokio::test]
async fn login_success_with_top_level_identity() {
    let (store, api) = store();
    api.respond(200, json!({ "message": "User logged in successfully", "identity": shopper_json() }));

    let outcome = store.login("asha@example.com", "secret").await.unwrap();

    assert_eq!(outcome.map(|o| o.identity), Some(shopper()));
    assert_eq!(api.request_count(), 1);
}

#[tokio::test]
async fn login_cookie_only_answer_fetches_identity() {
    let (store, api) = store();
    api.respond(200, json!({ "message": "User logged in successfully", "status": 200, "body": [] }));
    api.respond(200, json!({ "message": "Session is valid.", "status": 200, "body": shopper_json() }));

    let outcome = store.login("asha@example.com", "secret").await.unwrap().unwrap();

    assert_eq!(outcome.identity, shopper());
    assert_eq!(api.requests()[1].path, "/users/auth");
    assert_eq!(store.identity(), Some(shopper()));
}

#[tokio::test]
async fn login_cookie_only_answer_with_failed_lookup_is_absent() {
    let (store, api) = store();
    api.respond(200, json!({ "message": "User logged in successfully", "body": [] }));
    api.respond(401, json!({ "message": "Unauthorized" }));

    assert_eq!(store.login("asha@example.com", "secret").await, Ok(None));
    assert_eq!(store.identity(), None);
}

#[tokio::test]
async fn login_rejected_returns_none_and_leaves_anonymous() {
    let (store, api) = store();
    store.state.update_state(|s| s.loading = false);
    api.respond(401, json!({ "message": "Invalid credentials", "status": 401, "body": {} }));

    let result = store.login("asha@example.com", "wrong").await;

    assert_eq!(result, Ok(None));
    assert_eq!(store.session().phase(), SessionPhase::Anonymous);
}

#[tokio::test]
async fn login_rejected_keeps_existing_identity() {
    let (store, api) = authenticated();
    api.respond(401, json!({ "message": "Invalid credentials" }));

    assert_eq!(store.login("other@example.com", "wrong").await, Ok(None));
    assert_eq!(store.identity(), Some(shopper()));
}

#[tokio::test]
async fn login_network_failure_propagates() {
    let (store, api) = store();
    api.fail_network("offline");

    let err = store.login("asha@example.com", "secret").await.unwrap_err();

    assert_eq!(err, ClientError::Network("offline".to_owned()));
    assert_eq!(store.identity(), None);
}

// =============================================================
// logout
// =============================================================

#[tokio::test]
async fn logout_clears_identity_on_success() {
    let (store, api) = authenticated();
    api.respond(200, json!({ "message": "Logged out successfully", "status": 200, "body": {} }));

    store.logout().await;

    assert_eq!(store.identity(), None);
    assert_eq!(api.requests()[0].path, "/users/logout");
    assert_eq!(api.requests()[0].method, Method::Post);
}

#[tokio::test]
async fn logout_clears_identity_when_server_rejects() {
    let (store, api) = authenticated();
    api.respond(401, json!({ "message": "Logout Failed" }));

    store.logout().await;

    assert_eq!(store.identity(), None);
}

#[tokio::test]
async fn logout_clears_identity_when_network_fails() {
    let (store, api) = authenticated();
    api.fail_network("offline");

    store.logout().await;

    assert_eq!(store.identity(), None);
    assert_eq!(store.session().phase(), SessionPhase::Anonymous);
}
