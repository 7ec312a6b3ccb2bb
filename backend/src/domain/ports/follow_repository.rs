//! Port for the follower graph between users.
use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Listing, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by follow repository adapters.
    pub enum FollowPersistenceError {
        Connection { message: String } => "follow repository connection failed: {message}",
        Query { message: String } => "follow repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Record that `user` follows `author`. Returns `false` when the follow
    /// already existed; no second row is written.
    async fn follow(&self, user: UserId, author: UserId) -> Result<bool, FollowPersistenceError>;

    /// Remove the follow. Returns `false` when there was nothing to remove.
    async fn unfollow(&self, user: UserId, author: UserId)
    -> Result<bool, FollowPersistenceError>;

    /// The subset of `authors` that `user` follows.
    async fn followed_among(
        &self,
        user: UserId,
        authors: &[UserId],
    ) -> Result<Vec<UserId>, FollowPersistenceError>;

    /// Authors followed by `user`, ordered by author id.
    async fn list_followed(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Listing<User>, FollowPersistenceError>;
}
