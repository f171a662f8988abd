//! One-shot device geolocation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The search page asks for a position once per activation; nothing here
//! watches or retries. The browser implementation adapts the callback-based
//! `navigator.geolocation.getCurrentPosition` to a future.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "geo_test.rs"]
mod geo_test;

use async_trait::async_trait;

use crate::net::error::ClientError;
use crate::net::types::Coordinates;

/// Source of the device's current position.
#[async_trait(?Send)]
pub trait Geolocator {
    /// # Errors
    ///
    /// Returns [`ClientError::CapabilityUnavailable`] when the position
    /// cannot be obtained.
    async fn current_position(&self) -> Result<Coordinates, ClientError>;
}

/// Map a `GeolocationPositionError.code` to a readable reason.
#[must_use]
pub fn position_error_reason(code: u16) -> &'static str {
    match code {
        1 => "permission denied",
        2 => "position unavailable",
        3 => "timed out",
        _ => "unknown geolocation error",
    }
}

/// Position supplied up front (command-line flags, fixtures).
#[derive(Clone, Debug, PartialEq)]
pub struct FixedGeolocator {
    position: Option<Coordinates>,
}

impl FixedGeolocator {
    #[must_use]
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

#[async_trait(?Send)]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Coordinates, ClientError> {
        self.position
            .ok_or_else(|| ClientError::CapabilityUnavailable("no position configured".to_owned()))
    }
}

/// `navigator.geolocation` in the browser; unsupported elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserGeolocator;

#[async_trait(?Send)]
impl Geolocator for BrowserGeolocator {
    async fn current_position(&self) -> Result<Coordinates, ClientError> {
        #[cfg(feature = "hydrate")]
        {
            browser::current_position().await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ClientError::CapabilityUnavailable("geolocation not available on server".to_owned()))
        }
    }
}

#[cfg(feature = "hydrate")]
mod browser {
    use futures::channel::oneshot;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::JsValue;
    use wasm_bindgen::closure::Closure;

    use super::position_error_reason;
    use crate::net::error::ClientError;
    use crate::net::types::Coordinates;

    fn number_at(value: &JsValue, path: &[&str]) -> Option<f64> {
        let mut current = value.clone();
        for key in path {
            current = js_sys::Reflect::get(&current, &JsValue::from_str(key)).ok()?;
        }
        current.as_f64()
    }

    pub(super) async fn current_position() -> Result<Coordinates, ClientError> {
        let unavailable = |reason: &str| ClientError::CapabilityUnavailable(reason.to_owned());

        let window = web_sys::window().ok_or_else(|| unavailable("no window"))?;
        let geolocation = window
            .navigator()
            .geolocation()
            .map_err(|_| unavailable("geolocation unsupported"))?;

        let (tx, rx) = oneshot::channel::<Result<Coordinates, ClientError>>();
        let tx = std::rc::Rc::new(std::cell::RefCell::new(Some(tx)));

        let on_success = {
            let tx = tx.clone();
            Closure::once_into_js(move |position: JsValue| {
                let coords = match (
                    number_at(&position, &["coords", "latitude"]),
                    number_at(&position, &["coords", "longitude"]),
                ) {
                    (Some(latitude), Some(longitude)) => Ok(Coordinates { latitude, longitude }),
                    _ => Err(ClientError::CapabilityUnavailable("malformed position".to_owned())),
                };
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(coords);
                }
            })
        };
        let on_error = {
            let tx = tx.clone();
            Closure::once_into_js(move |error: JsValue| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let code = number_at(&error, &["code"]).unwrap_or(0.0) as u16;
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(Err(ClientError::CapabilityUnavailable(position_error_reason(code).to_owned())));
                }
            })
        };

        geolocation
            .get_current_position_with_error_callback(on_success.unchecked_ref(), Some(on_error.unchecked_ref()))
            .map_err(|_| unavailable("geolocation request rejected"))?;

        rx.await.unwrap_or_else(|_| Err(unavailable("geolocation callback dropped")))
    }
}
