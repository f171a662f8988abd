//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser capabilities and route-guard rules from
//! page and component logic to improve reuse and testability.

pub mod auth;
pub mod geo;
