//! Driving port for following and unfollowing authors.

use async_trait::async_trait;

use crate::domain::{Error, SubscriptionView, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionCommand: Send + Sync {
    /// Follow `author` and return the author's subscription card, with the
    /// recipe preview truncated to `recipes_limit` when set.
    async fn subscribe(
        &self,
        user: UserId,
        author: UserId,
        recipes_limit: Option<u32>,
    ) -> Result<SubscriptionView, Error>;

    /// Stop following `author`.
    async fn unsubscribe(&self, user: UserId, author: UserId) -> Result<(), Error>;
}
