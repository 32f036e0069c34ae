//! Session and account scenarios: login failure modes, registration
//! uniqueness, profile merges, and persistence across reloads.

use kiosk_integration_tests::{draft_named as draft, test_state, test_storage};
use kiosk_storefront::models::{PersonName, ProfileUpdate};
use kiosk_storefront::stores::SessionError;

#[tokio::test]
async fn wrong_password_and_unknown_username_are_indistinguishable() {
    let storage = test_storage();
    let mut state = test_state(&storage);

    let wrong_password = state.login("johnd", "wrong").await;
    let unknown_user = state.login("nobody", "m38rmF$").await;

    assert_eq!(wrong_password, Err(SessionError::InvalidCredentials));
    assert_eq!(unknown_user, Err(SessionError::InvalidCredentials));
    assert!(!state.session().is_authenticated());
}

#[tokio::test]
async fn register_implies_login_and_assigns_next_id() {
    let storage = test_storage();
    let mut state = test_state(&storage);

    let user = state
        .register(draft("newbie", "newbie@example.com"))
        .await
        .expect("registration succeeds");

    // Seeds occupy ids 1-3.
    assert_eq!(user.id.as_i64(), 4);
    assert!(state.session().is_authenticated());
    assert_eq!(
        state.session().current().map(|u| u.username.as_str()),
        Some("newbie")
    );
}

#[tokio::test]
async fn duplicate_username_rejected_without_mutating_known_set() {
    let storage = test_storage();
    let mut state = test_state(&storage);

    // "johnd" is a seed user.
    let result = state.register(draft("johnd", "fresh@example.com")).await;
    assert_eq!(result, Err(SessionError::DuplicateUsername));
    assert!(!state.session().is_authenticated());

    // The known set did not grow: the next successful registration still
    // gets id 4.
    let user = state
        .register(draft("fresh", "fresh@example.com"))
        .await
        .expect("registration succeeds");
    assert_eq!(user.id.as_i64(), 4);
}

#[tokio::test]
async fn duplicate_email_rejected() {
    let storage = test_storage();
    let mut state = test_state(&storage);

    let result = state.register(draft("unique", "john@gmail.com")).await;
    assert_eq!(result, Err(SessionError::DuplicateEmail));
}

#[tokio::test]
async fn registered_account_survives_reload() {
    let storage = test_storage();

    let mut state = test_state(&storage);
    state
        .register(draft("durable", "durable@example.com"))
        .await
        .expect("registration succeeds");
    state.logout();
    drop(state);

    let mut reloaded = test_state(&storage);
    let user = reloaded
        .login("durable", "pass123")
        .await
        .expect("registered user can log back in");
    assert_eq!(user.email.as_str(), "durable@example.com");
}

#[tokio::test]
async fn update_profile_requires_session() {
    let storage = test_storage();
    let mut state = test_state(&storage);

    let result = state
        .update_profile(ProfileUpdate {
            phone: Some("555-0199".to_string()),
            ..ProfileUpdate::default()
        })
        .await;
    assert_eq!(result, Err(SessionError::NoActiveSession));
}

#[tokio::test]
async fn update_profile_merges_and_persists() {
    let storage = test_storage();

    let mut state = test_state(&storage);
    state.login("johnd", "m38rmF$").await.expect("seed login");

    let updated = state
        .update_profile(ProfileUpdate {
            phone: Some("555-0199".to_string()),
            name: Some(PersonName {
                firstname: "Johnny".to_string(),
                lastname: "Doe".to_string(),
            }),
            ..ProfileUpdate::default()
        })
        .await
        .expect("profile update succeeds");

    assert_eq!(updated.phone, "555-0199");
    assert_eq!(updated.name.firstname, "Johnny");
    // Untouched top-level fields survive the shallow merge.
    assert_eq!(updated.username, "johnd");
    drop(state);

    // The persisted session carries the update across a reload.
    let reloaded = test_state(&storage);
    assert_eq!(
        reloaded.session().current().map(|u| u.phone.as_str()),
        Some("555-0199")
    );
}

#[tokio::test]
async fn logout_is_idempotent() {
    let storage = test_storage();
    let mut state = test_state(&storage);

    state.logout();
    assert!(!state.session().is_authenticated());

    state.login("johnd", "m38rmF$").await.expect("seed login");
    state.logout();
    state.logout();
    assert!(!state.session().is_authenticated());
}
