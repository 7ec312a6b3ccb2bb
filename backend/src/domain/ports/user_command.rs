//! Driving port for registration and password changes.

use async_trait::async_trait;

use crate::domain::{Email, Error, Password, PersonName, User, UserId, Username};

/// Validated registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    pub email: Email,
    pub username: Username,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub password: Password,
}

/// Password change for the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangePasswordRequest {
    pub user_id: UserId,
    pub current_password: String,
    pub new_password: Password,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Create an account; e-mail and username must be unused.
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error>;

    /// Replace the password after checking the current one.
    async fn change_password(&self, request: ChangePasswordRequest) -> Result<(), Error>;
}
