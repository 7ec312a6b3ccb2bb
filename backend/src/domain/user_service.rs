//! Account services: login, registration, password changes and profiles.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use pagination::PageRequest;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    ChangePasswordRequest, FollowPersistenceError, FollowRepository, LoginService, NewUser,
    RegisterUserRequest, UserCommand, UserPersistenceError, UserRepository, UsersQuery,
};
use crate::domain::{
    Email, Error, Listing, LoginCredentials, Password, PasswordHash, User, UserId, UserView,
    Viewer,
};

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { field } => {
            Error::already_exists(format!("a user with this {field} already exists"))
        }
    }
}

pub(crate) fn map_follow_error(error: FollowPersistenceError) -> Error {
    match error {
        FollowPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("follow repository unavailable: {message}"))
        }
        FollowPersistenceError::Query { message } => {
            Error::internal(format!("follow repository error: {message}"))
        }
    }
}

/// Hash on the blocking pool; Argon2 would stall an async worker.
async fn hash_password(password: Password) -> Result<PasswordHash, Error> {
    tokio::task::spawn_blocking(move || PasswordHash::generate(&password))
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
        .map_err(|err| Error::internal(err.to_string()))
}

async fn verify_password(hash: PasswordHash, candidate: String) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || hash.verify(&candidate))
        .await
        .map_err(|err| Error::internal(format!("password verification task failed: {err}")))
}

/// Hash checked on logins for unknown e-mails, so every failed login pays
/// for one Argon2 verification.
static ABSENT_USER_HASH: LazyLock<Option<PasswordHash>> = LazyLock::new(|| {
    Password::new("absent-user-password")
        .ok()
        .and_then(|password| PasswordHash::generate(&password).ok())
});

async fn verify_absent_user(candidate: String) -> Result<(), Error> {
    tokio::task::spawn_blocking(move || {
        if let Some(hash) = ABSENT_USER_HASH.as_ref() {
            hash.verify(&candidate);
        }
    })
    .await
    .map_err(|err| Error::internal(format!("password verification task failed: {err}")))
}

/// Mark each user with whether `viewer` follows them.
pub(crate) async fn user_views<F>(
    follows: &F,
    viewer: Viewer,
    users: Vec<User>,
) -> Result<Vec<UserView>, Error>
where
    F: FollowRepository + ?Sized,
{
    let followed: HashSet<UserId> = match viewer.user_id() {
        Some(me) if !users.is_empty() => {
            let ids: Vec<UserId> = users.iter().map(|user| user.id).collect();
            follows
                .followed_among(me, &ids)
                .await
                .map_err(map_follow_error)?
                .into_iter()
                .collect()
        }
        _ => HashSet::new(),
    };
    Ok(users
        .into_iter()
        .map(|user| UserView {
            is_subscribed: followed.contains(&user.id),
            user,
        })
        .collect())
}

/// User service implementing the account driving ports.
#[derive(Clone)]
pub struct UserService<U, F> {
    users: Arc<U>,
    follows: Arc<F>,
}

impl<U, F> UserService<U, F> {
    pub fn new(users: Arc<U>, follows: Arc<F>) -> Self {
        Self { users, follows }
    }
}

#[async_trait]
impl<U, F> LoginService for UserService<U, F>
where
    U: UserRepository,
    F: FollowRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let email = Email::new(credentials.email())
            .map_or_else(|_| credentials.email().to_owned(), String::from);
        let Some(stored) = self
            .users
            .find_credentials_by_email(&email)
            .await
            .map_err(map_user_error)?
        else {
            verify_absent_user(credentials.password().to_owned()).await?;
            debug!("login for unknown email");
            return Err(Error::unauthorized("invalid credentials"));
        };
        if !verify_password(stored.password_hash, credentials.password().to_owned()).await? {
            warn!(user_id = %stored.user_id, "login with wrong password");
            return Err(Error::unauthorized("invalid credentials"));
        }
        Ok(stored.user_id)
    }
}

#[async_trait]
impl<U, F> UserCommand for UserService<U, F>
where
    U: UserRepository,
    F: FollowRepository,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error> {
        let RegisterUserRequest {
            email,
            username,
            first_name,
            last_name,
            password,
        } = request;
        let password_hash = hash_password(password).await?;
        let user = self
            .users
            .create(&NewUser {
                email,
                username,
                first_name,
                last_name,
                password_hash,
            })
            .await
            .map_err(map_user_error)?;
        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    async fn change_password(&self, request: ChangePasswordRequest) -> Result<(), Error> {
        let current = self
            .users
            .find_password_hash(request.user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("login required"))?;
        if !verify_password(current, request.current_password).await? {
            warn!(user_id = %request.user_id, "password change with wrong current password");
            return Err(Error::invalid_request("current password is incorrect").with_details(
                serde_json::json!({
                    "field": "current_password",
                    "code": "incorrect_password",
                }),
            ));
        }
        let hash = hash_password(request.new_password).await?;
        self.users
            .update_password(request.user_id, &hash)
            .await
            .map_err(map_user_error)?;
        info!(user_id = %request.user_id, "password changed");
        Ok(())
    }
}

#[async_trait]
impl<U, F> UsersQuery for UserService<U, F>
where
    U: UserRepository,
    F: FollowRepository,
{
    async fn list_users(
        &self,
        viewer: Viewer,
        page: PageRequest,
    ) -> Result<Listing<UserView>, Error> {
        let listing = self.users.list(page).await.map_err(map_user_error)?;
        let items = user_views(self.follows.as_ref(), viewer, listing.items).await?;
        Ok(Listing::new(items, listing.total))
    }

    async fn get_user(&self, viewer: Viewer, id: UserId) -> Result<UserView, Error> {
        let user = self
            .users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))?;
        let mut views = user_views(self.follows.as_ref(), viewer, vec![user]).await?;
        views
            .pop()
            .ok_or_else(|| Error::internal("user view was not built"))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
