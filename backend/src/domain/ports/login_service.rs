//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing storage, so handler tests can substitute a mock.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown e-mails and wrong passwords both yield the same
    /// `unauthorized` error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
