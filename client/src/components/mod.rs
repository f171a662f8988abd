//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render page chrome and search results; the session-aware ones
//! read the shared `AppSession` from Leptos context.

pub mod shop_card;
pub mod site_header;
