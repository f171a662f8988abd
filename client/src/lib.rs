//! # client
//!
//! Leptos + WASM frontend for NearBuy: nearby-shop search, login and
//! role-based signup against the NearBuy REST backend.
//!
//! Flows in `state` are written against the `Transport`, `Geolocator` and
//! `StateCell` seams, so the browser app, the command-line client and the
//! unit tests all drive the same code.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
