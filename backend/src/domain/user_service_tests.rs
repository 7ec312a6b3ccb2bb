//! Tests for the account service.

use std::sync::Arc;

use pagination::PageRequest;
use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockFollowRepository, MockUserRepository, StoredCredentials};
use crate::domain::service_test_support::{user, user_id};
use crate::domain::{PersonName, Username};

fn make_service(
    users: MockUserRepository,
    follows: MockFollowRepository,
) -> UserService<MockUserRepository, MockFollowRepository> {
    UserService::new(Arc::new(users), Arc::new(follows))
}

fn stored(id: i64, password: &str) -> StoredCredentials {
    let password = Password::new(password).expect("strong password");
    StoredCredentials {
        user_id: user_id(id),
        password_hash: PasswordHash::generate(&password).expect("hash"),
    }
}

fn register_request() -> RegisterUserRequest {
    RegisterUserRequest {
        email: Email::new("ada@example.com").expect("valid email"),
        username: Username::new("ada").expect("valid username"),
        first_name: PersonName::new("Ada").expect("valid name"),
        last_name: PersonName::new("Lovelace").expect("valid name"),
        password: Password::new("correct horse").expect("strong password"),
    }
}

#[rstest]
#[case("correct horse", true)]
#[case("wrong horse", false)]
#[tokio::test]
async fn authenticate_checks_the_stored_hash(#[case] password: &str, #[case] accepted: bool) {
    let mut users = MockUserRepository::new();
    let credentials = stored(7, "correct horse");
    users
        .expect_find_credentials_by_email()
        .withf(|email| email == "ada@example.com")
        .times(1)
        .return_once(move |_| Ok(Some(credentials)));
    let service = make_service(users, MockFollowRepository::new());

    let creds = LoginCredentials::try_from_parts("ada@EXAMPLE.com", password).expect("shape");
    let result = service.authenticate(&creds).await;

    match (accepted, result) {
        (true, Ok(id)) => assert_eq!(id, user_id(7)),
        (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
        (_, other) => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn authenticate_rejects_unknown_email() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_credentials_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    let service = make_service(users, MockFollowRepository::new());

    let creds = LoginCredentials::try_from_parts("nobody@example.com", "pw").expect("shape");
    let err = service.authenticate(&creds).await.expect_err("unknown user");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), "invalid credentials");
}

#[rstest]
fn absent_user_hash_matches_stored_hash_parameters() {
    let absent = ABSENT_USER_HASH.as_ref().expect("absent user hash");
    let real = stored(1, "correct horse").password_hash;
    let params = |hash: &PasswordHash| -> String {
        hash.as_str().split('$').take(4).collect::<Vec<_>>().join("$")
    };
    assert_eq!(params(absent), params(&real));
    assert!(!absent.verify("correct horse"));
}

#[tokio::test]
async fn register_stores_a_hash_not_the_password() {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .withf(|new_user| {
            new_user.password_hash.as_str().starts_with("$argon2")
                && new_user.password_hash.verify("correct horse")
        })
        .times(1)
        .return_once(|_| Ok(user(3)));
    let service = make_service(users, MockFollowRepository::new());

    let created = service.register(register_request()).await.expect("registered");
    assert_eq!(created.id, user_id(3));
}

#[tokio::test]
async fn register_maps_duplicates_to_already_exists() {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::duplicate("email")));
    let service = make_service(users, MockFollowRepository::new());

    let err = service.register(register_request()).await.expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "a user with this email already exists");
    assert_eq!(
        err.details().and_then(|d| d.get("code")),
        Some(&serde_json::json!("already_exists"))
    );
}

#[tokio::test]
async fn change_password_requires_the_current_password() {
    let mut users = MockUserRepository::new();
    let current = stored(5, "correct horse").password_hash;
    users
        .expect_find_password_hash()
        .times(1)
        .return_once(move |_| Ok(Some(current)));
    users.expect_update_password().never();
    let service = make_service(users, MockFollowRepository::new());

    let err = service
        .change_password(ChangePasswordRequest {
            user_id: user_id(5),
            current_password: "guess".to_owned(),
            new_password: Password::new("battery staple").expect("strong password"),
        })
        .await
        .expect_err("wrong current password");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn change_password_replaces_the_hash() {
    let mut users = MockUserRepository::new();
    let current = stored(5, "correct horse").password_hash;
    users
        .expect_find_password_hash()
        .times(1)
        .return_once(move |_| Ok(Some(current)));
    users
        .expect_update_password()
        .withf(|id, hash| *id == user_id(5) && hash.verify("battery staple"))
        .times(1)
        .return_once(|_, _| Ok(()));
    let service = make_service(users, MockFollowRepository::new());

    service
        .change_password(ChangePasswordRequest {
            user_id: user_id(5),
            current_password: "correct horse".to_owned(),
            new_password: Password::new("battery staple").expect("strong password"),
        })
        .await
        .expect("password changed");
}

#[tokio::test]
async fn anonymous_listing_never_marks_subscriptions() {
    let mut users = MockUserRepository::new();
    users
        .expect_list()
        .times(1)
        .return_once(|_| Ok(Listing::new(vec![user(1), user(2)], 2)));
    let mut follows = MockFollowRepository::new();
    follows.expect_followed_among().never();
    let service = make_service(users, follows);

    let page = PageRequest::new(1, 6).expect("valid page");
    let listing = service
        .list_users(Viewer::Anonymous, page)
        .await
        .expect("listing");
    assert_eq!(listing.total, 2);
    assert!(listing.items.iter().all(|view| !view.is_subscribed));
}

#[tokio::test]
async fn authenticated_listing_marks_followed_users() {
    let mut users = MockUserRepository::new();
    users
        .expect_list()
        .times(1)
        .return_once(|_| Ok(Listing::new(vec![user(1), user(2), user(3)], 3)));
    let mut follows = MockFollowRepository::new();
    follows
        .expect_followed_among()
        .withf(|me, ids| *me == user_id(9) && ids.len() == 3)
        .times(1)
        .return_once(|_, _| Ok(vec![user_id(2)]));
    let service = make_service(users, follows);

    let page = PageRequest::new(1, 6).expect("valid page");
    let listing = service
        .list_users(Viewer::Authenticated(user_id(9)), page)
        .await
        .expect("listing");
    let flags: Vec<bool> = listing.items.iter().map(|v| v.is_subscribed).collect();
    assert_eq!(flags, [false, true, false]);
}

#[tokio::test]
async fn get_user_reports_missing_users() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(1).return_once(|_| Ok(None));
    let service = make_service(users, MockFollowRepository::new());

    let err = service
        .get_user(Viewer::Anonymous, user_id(42))
        .await
        .expect_err("missing user");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn connection_failures_map_to_service_unavailable() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::connection("pool exhausted")));
    let service = make_service(users, MockFollowRepository::new());

    let err = service
        .get_user(Viewer::Anonymous, user_id(1))
        .await
        .expect_err("unavailable");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
