//! Driving port for listing followed authors.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Error, Listing, SubscriptionView, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionQuery: Send + Sync {
    async fn list_subscriptions(
        &self,
        user: UserId,
        page: PageRequest,
        recipes_limit: Option<u32>,
    ) -> Result<Listing<SubscriptionView>, Error>;
}
