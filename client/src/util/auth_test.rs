use super::*;
use crate::net::types::{Role, User};

fn vendor() -> User {
    User {
        id: "v-7".to_owned(),
        full_name: "Mina Rao".to_owned(),
        email: "mina@example.com".to_owned(),
        role: Role::Vendor,
    }
}

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    let session = Session { identity: None, loading: false };
    assert!(should_redirect_unauth(&session));
    assert!(!should_redirect_authed(&session));
}

#[test]
fn neither_guard_acts_while_loading() {
    let fresh = Session::default();
    let pending_with_user = Session { identity: Some(vendor()), loading: true };
    for session in [fresh, pending_with_user] {
        assert!(!should_redirect_unauth(&session));
        assert!(!should_redirect_authed(&session));
    }
}

#[test]
fn signed_in_user_is_sent_away_from_auth_views_only() {
    let session = Session { identity: Some(vendor()), loading: false };
    assert!(should_redirect_authed(&session));
    assert!(!should_redirect_unauth(&session));
}
