use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;

use super::*;
use crate::net::api::Method;
use crate::net::test_helpers::ScriptedTransport;
use crate::net::types::{PLACEHOLDER_SHOP_LATITUDE, PLACEHOLDER_SHOP_LONGITUDE};

type TestFlow = SignupFlow<ScriptedTransport, Rc<RefCell<SignupState>>>;

fn filled_form(role: Role) -> SignupForm {
    let mut form = SignupForm::default();
    form.set_field(field::FULL_NAME, "Ravi Kumar");
    form.set_field(field::EMAIL, "ravi@example.com");
    form.set_field(field::PASSWORD, "secret123");
    form.set_role(role);
    form
}

fn flow(form: SignupForm) -> (TestFlow, ScriptedTransport) {
    let api = ScriptedTransport::new();
    let state = SignupState { form, ..SignupState::default() };
    (SignupFlow::new(api.clone(), Rc::new(RefCell::new(state))), api)
}

// =============================================================
// SignupForm
// =============================================================

#[test]
fn default_form_is_user_role_with_empty_fields() {
    let form = SignupForm::default();
    assert_eq!(form.role, Role::User);
    assert_eq!(form.field(field::EMAIL), "");
}

#[test]
fn role_toggle_preserves_shared_fields() {
    let mut form = filled_form(Role::User);

    form.set_role(Role::Vendor);
    form.set_field(field::SHOP_NAME, "Ravi Provisions");
    form.set_role(Role::User);

    assert_eq!(form.field(field::FULL_NAME), "Ravi Kumar");
    assert_eq!(form.field(field::EMAIL), "ravi@example.com");
    assert_eq!(form.field(field::PASSWORD), "secret123");
    assert_eq!(form.field(field::SHOP_NAME), "Ravi Provisions");
}

#[test]
fn user_payload_ignores_vendor_fields() {
    let mut form = filled_form(Role::User);
    form.set_field(field::SHOP_NAME, "left over");

    let RegistrationPayload::User(user) = form.payload() else {
        panic!("expected user payload");
    };
    assert_eq!(user.full_name, "Ravi Kumar");
}

#[test]
fn vendor_payload_includes_shop_fields_and_placeholders() {
    let mut form = filled_form(Role::Vendor);
    form.set_field(field::SHOP_NAME, "Ravi Provisions");
    form.set_field(field::ADDRESS, "Lane 4, Saheed Nagar");
    form.set_field(field::CONTACT, "9876543210");

    let RegistrationPayload::Vendor(vendor) = form.payload() else {
        panic!("expected vendor payload");
    };
    assert_eq!(vendor.shop_name, "Ravi Provisions");
    assert_eq!(vendor.contact, "9876543210");
    assert!((vendor.latitude - PLACEHOLDER_SHOP_LATITUDE).abs() < f64::EPSILON);
    assert!((vendor.longitude - PLACEHOLDER_SHOP_LONGITUDE).abs() < f64::EPSILON);
    assert!(vendor.is_open);
}

// =============================================================
// register / submit
// =============================================================

#[tokio::test]
async fn register_posts_to_role_endpoint() {
    let api = ScriptedTransport::new();
    api.respond(201, json!({ "message": "User registered successfully", "status": 201, "body": {} }));

    let message = register(&api, &filled_form(Role::User).payload()).await.unwrap();

    assert_eq!(message, "User registered successfully");
    let sent = &api.requests()[0];
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.path, "/users/signup/user");
    assert_eq!(sent.body.as_ref().and_then(|b| b.get("email")), Some(&json!("ravi@example.com")));
}

#[tokio::test]
async fn register_treats_plain_200_as_failure() {
    let api = ScriptedTransport::new();
    api.respond(200, json!({ "message": "ok" }));

    let err = register(&api, &filled_form(Role::User).payload()).await.unwrap_err();
    assert_eq!(err, ClientError::Validation { status: 200, message: "ok".to_owned() });
}

#[tokio::test]
async fn vendor_submit_created_returns_message_without_signing_in() {
    let mut form = filled_form(Role::Vendor);
    form.set_field(field::SHOP_NAME, "Ravi Provisions");
    let (flow, api) = flow(form);
    api.respond(201, json!({ "message": "Vendor registered", "status": 201, "body": {} }));

    let outcome = flow.submit().await;

    assert_eq!(outcome.as_deref(), Some("Vendor registered"));
    assert_eq!(api.requests()[0].path, "/users/signup/vendor");
    assert_eq!(api.request_count(), 1);
    let state = flow.state().borrow().clone();
    assert!(state.error.is_empty());
    assert!(!state.busy);
}

#[tokio::test]
async fn submit_rejection_shows_server_message() {
    let (flow, api) = flow(filled_form(Role::User));
    api.respond(403, json!({ "message": "Email already registered, Please try again", "status": 403, "body": {} }));

    assert_eq!(flow.submit().await, None);

    let state = flow.state().borrow().clone();
    assert_eq!(state.error, "Email already registered, Please try again");
    assert!(!state.busy);
}

#[tokio::test]
async fn submit_network_failure_shows_fallback() {
    let (flow, api) = flow(filled_form(Role::User));
    api.fail_network("offline");

    assert_eq!(flow.submit().await, None);
    assert_eq!(flow.state().borrow().error, REGISTRATION_FAILED_MESSAGE);
}

#[tokio::test]
async fn submit_clears_previous_error_on_success() {
    let (flow, api) = flow(filled_form(Role::User));
    api.respond(422, json!({ "detail": [{ "msg": "value is not a valid email address" }] }));
    api.respond(201, json!({}));

    assert_eq!(flow.submit().await, None);
    assert_eq!(flow.state().borrow().error, "value is not a valid email address");

    assert_eq!(flow.submit().await.as_deref(), Some(REGISTERED_MESSAGE));
    assert!(flow.state().borrow().error.is_empty());
}
