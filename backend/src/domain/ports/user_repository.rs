//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Email, Listing, PasswordHash, PersonName, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique column (`email` or `username`) already holds the value.
        Duplicate { field: String } => "a user with this {field} already exists",
    }
}

/// Fields of a user about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: Email,
    pub username: Username,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub password_hash: PasswordHash,
}

/// Stored login material for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user_id: UserId,
    pub password_hash: PasswordHash,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return it with its assigned id.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch login material by e-mail address.
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Fetch the stored hash of a user's password.
    async fn find_password_hash(
        &self,
        id: UserId,
    ) -> Result<Option<PasswordHash>, UserPersistenceError>;

    /// Replace a user's password hash.
    async fn update_password(
        &self,
        id: UserId,
        hash: &PasswordHash,
    ) -> Result<(), UserPersistenceError>;

    /// One page of users ordered by id, plus the total user count.
    async fn list(&self, page: PageRequest) -> Result<Listing<User>, UserPersistenceError>;
}
