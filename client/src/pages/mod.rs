//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (one flow from `state`) and
//! delegates rendering details to `components`.

pub mod dashboard;
pub mod home;
pub mod login;
pub mod not_found;
pub mod signup;

pub const HOME_ROUTE: &str = "/";
pub const LOGIN_ROUTE: &str = "/login";
pub const SIGNUP_ROUTE: &str = "/signup";
pub const DASHBOARD_ROUTE: &str = "/dashboard";
