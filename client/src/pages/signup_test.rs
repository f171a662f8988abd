use super::*;

fn ids(role: Role) -> Vec<&'static str> {
    visible_fields(role).into_iter().map(|(id, _, _)| id).collect()
}

#[test]
fn user_role_shows_shared_fields_only() {
    assert_eq!(ids(Role::User), [field::FULL_NAME, field::EMAIL, field::PASSWORD]);
}

#[test]
fn vendor_role_appends_shop_fields() {
    assert_eq!(
        ids(Role::Vendor),
        [field::FULL_NAME, field::EMAIL, field::PASSWORD, field::SHOP_NAME, field::ADDRESS, field::CONTACT]
    );
}

#[test]
fn password_input_is_masked() {
    let password = visible_fields(Role::User).into_iter().find(|(id, _, _)| *id == field::PASSWORD);
    assert_eq!(password.map(|(_, _, kind)| kind), Some("password"));
}

#[test]
fn button_label_tracks_busy_flag() {
    assert_eq!(signup_button_label(false), "Sign Up");
    assert_eq!(signup_button_label(true), "Signing Up...");
}
