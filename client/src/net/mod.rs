//! Networking modules for the NearBuy REST boundary.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the transport seam and endpoint paths, `error` the client-side
//! failure taxonomy, and `types` the wire schema.

pub mod api;
pub mod error;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
