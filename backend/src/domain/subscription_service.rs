//! Following authors and listing the authors a user follows.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageRequest;
use tracing::{info, warn};

use crate::domain::ports::{
    FollowRepository, RecipeRepository, SubscriptionCommand,
    SubscriptionQuery, UserRepository,
};
use crate::domain::recipe_service::map_recipe_error;
use crate::domain::user_service::{map_follow_error, map_user_error};
use crate::domain::{Error, Listing, SubscriptionView, User, UserId, UserView};

/// Subscription service implementing the follow driving ports.
#[derive(Clone)]
pub struct SubscriptionService<U, F, R> {
    users: Arc<U>,
    follows: Arc<F>,
    recipes: Arc<R>,
}

impl<U, F, R> SubscriptionService<U, F, R> {
    pub fn new(users: Arc<U>, follows: Arc<F>, recipes: Arc<R>) -> Self {
        Self {
            users,
            follows,
            recipes,
        }
    }
}

impl<U, F, R> SubscriptionService<U, F, R>
where
    U: UserRepository,
    F: FollowRepository,
    R: RecipeRepository,
{
    async fn require_author(&self, author: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(author)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {author} not found")))
    }

    async fn subscription_card(
        &self,
        author: User,
        recipes_limit: Option<u32>,
    ) -> Result<SubscriptionView, Error> {
        let recipes = self
            .recipes
            .summaries_by_author(author.id, recipes_limit)
            .await
            .map_err(map_recipe_error)?;
        Ok(SubscriptionView {
            author: UserView {
                user: author,
                is_subscribed: true,
            },
            recipes: recipes.items,
            recipes_count: recipes.total,
        })
    }
}

#[async_trait]
impl<U, F, R> SubscriptionCommand for SubscriptionService<U, F, R>
where
    U: UserRepository,
    F: FollowRepository,
    R: RecipeRepository,
{
    async fn subscribe(
        &self,
        user: UserId,
        author: UserId,
        recipes_limit: Option<u32>,
    ) -> Result<SubscriptionView, Error> {
        if user == author {
            warn!(%user, "attempt to subscribe to self");
            return Err(Error::invalid_request("you cannot subscribe to yourself"));
        }
        let author = self.require_author(author).await?;
        let created = self
            .follows
            .follow(user, author.id)
            .await
            .map_err(map_follow_error)?;
        if !created {
            return Err(Error::already_exists("already subscribed to this author"));
        }
        info!(%user, author = %author.id, "subscribed");
        self.subscription_card(author, recipes_limit).await
    }

    async fn unsubscribe(&self, user: UserId, author: UserId) -> Result<(), Error> {
        let author = self.require_author(author).await?;
        let removed = self
            .follows
            .unfollow(user, author.id)
            .await
            .map_err(map_follow_error)?;
        if !removed {
            warn!(%user, author = %author.id, "unsubscribe without subscription");
            return Err(Error::invalid_request("not subscribed to this author"));
        }
        info!(%user, author = %author.id, "unsubscribed");
        Ok(())
    }
}

#[async_trait]
impl<U, F, R> SubscriptionQuery for SubscriptionService<U, F, R>
where
    U: UserRepository,
    F: FollowRepository,
    R: RecipeRepository,
{
    async fn list_subscriptions(
        &self,
        user: UserId,
        page: PageRequest,
        recipes_limit: Option<u32>,
    ) -> Result<Listing<SubscriptionView>, Error> {
        let followed = self
            .follows
            .list_followed(user, page)
            .await
            .map_err(map_follow_error)?;
        let mut cards = Vec::with_capacity(followed.items.len());
        for author in followed.items {
            cards.push(self.subscription_card(author, recipes_limit).await?);
        }
        Ok(Listing::new(cards, followed.total))
    }
}

#[cfg(test)]
#[path = "subscription_service_tests.rs"]
mod tests;
