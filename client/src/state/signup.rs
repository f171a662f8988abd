//! Role-based registration form and submission flow.
//!
//! DESIGN
//! ======
//! The form keeps one field map shared by both roles, so toggling the role
//! never loses what was typed. The payload is only assembled, per role, at
//! submit time. No client-side validation: the backend owns it.
//!
//! A successful registration does not sign the visitor in. `SignupFlow`
//! holds no session store; the page sends the visitor to the login form.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use std::collections::BTreeMap;

use leptos::logging::warn;

use super::{ClearOnDrop, StateCell};
use crate::net::api::{ApiRequest, Transport};
use crate::net::error::ClientError;
use crate::net::types::{RegistrationPayload, Role, UserSignup, VendorSignup};

pub const REGISTRATION_FAILED_MESSAGE: &str = "An unexpected error occurred during registration.";
pub const REGISTERED_MESSAGE: &str = "Registration successful.";

/// Form field ids, shared with the page inputs.
pub mod field {
    pub const FULL_NAME: &str = "fullName";
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const SHOP_NAME: &str = "shopName";
    pub const ADDRESS: &str = "address";
    pub const CONTACT: &str = "contact";
}

const HTTP_CREATED: u16 = 201;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub role: Role,
    fields: BTreeMap<String, String>,
}

impl SignupForm {
    /// Switch role; entered values are kept.
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_owned(), value.into());
    }

    #[must_use]
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map_or("", String::as_str)
    }

    /// Payload for the current role.
    #[must_use]
    pub fn payload(&self) -> RegistrationPayload {
        let user = UserSignup {
            full_name: self.field(field::FULL_NAME).to_owned(),
            email: self.field(field::EMAIL).to_owned(),
            password: self.field(field::PASSWORD).to_owned(),
        };
        match self.role {
            Role::User => RegistrationPayload::User(user),
            Role::Vendor => RegistrationPayload::Vendor(VendorSignup::new(
                user,
                self.field(field::SHOP_NAME).to_owned(),
                self.field(field::ADDRESS).to_owned(),
                self.field(field::CONTACT).to_owned(),
            )),
        }
    }
}

/// View state of the signup page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupState {
    pub form: SignupForm,
    pub error: String,
    pub busy: bool,
}

/// Post a registration to its role-specific endpoint.
///
/// Returns the server message on `201 Created`.
///
/// # Errors
///
/// [`ClientError::Network`] when no response arrived, otherwise
/// [`ClientError::Validation`] for any status other than `201`.
pub async fn register<T: Transport + ?Sized>(api: &T, payload: &RegistrationPayload) -> Result<String, ClientError> {
    let body = serde_json::to_value(payload).map_err(|e| ClientError::Validation { status: 0, message: e.to_string() })?;
    let resp = api.send(ApiRequest::post(payload.endpoint()).with_json(body)).await?;
    if resp.status != HTTP_CREATED {
        return Err(ClientError::Validation { status: resp.status, message: resp.error_message().unwrap_or_default() });
    }
    Ok(resp.message().unwrap_or(REGISTERED_MESSAGE).to_owned())
}

#[derive(Clone)]
pub struct SignupFlow<T, C> {
    api: T,
    state: C,
}

impl<T, C> SignupFlow<T, C>
where
    T: Transport,
    C: StateCell<SignupState>,
{
    pub fn new(api: T, state: C) -> Self {
        Self { api, state }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    /// Submit the form. `Some(message)` means the account exists and the
    /// caller should move on to the login view; `None` leaves an error in
    /// the state.
    pub async fn submit(&self) -> Option<String> {
        let payload = self.state.with_state(|s| s.form.payload());
        self.state.update_state(|s| {
            s.error.clear();
            s.busy = true;
        });
        let _busy = ClearOnDrop::new(|| self.state.update_state(|s| s.busy = false));

        match register(&self.api, &payload).await {
            Ok(message) => Some(message),
            Err(e) => {
                warn!("{} signup failed: {e}", payload.role());
                let message = e.server_message().unwrap_or(REGISTRATION_FAILED_MESSAGE).to_owned();
                self.state.update_state(|s| s.error = message);
                None
            }
        }
    }
}
