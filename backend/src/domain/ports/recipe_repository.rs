//! Port for recipes and their ingredient and tag links.
use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Listing, Recipe, RecipeDraft, RecipeFilter, RecipeId, RecipeSummary, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by recipe repository adapters.
    pub enum RecipePersistenceError {
        Connection { message: String } => "recipe repository connection failed: {message}",
        Query { message: String } => "recipe repository query failed: {message}",
        /// Title and description collide with another recipe, or a tag field
        /// collides with a different existing tag.
        Duplicate { message: String } => "recipe conflicts with existing data: {message}",
        /// The recipe vanished between the ownership check and the write.
        NotFound { id: i64 } => "recipe {id} not found",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Insert the recipe with its ingredient rows and tag links in one
    /// transaction. Tags are resolved by slug and created when missing.
    async fn create(
        &self,
        author: UserId,
        draft: &RecipeDraft,
    ) -> Result<RecipeId, RecipePersistenceError>;

    /// Replace the recipe's columns, ingredient rows and tag links in one
    /// transaction. A draft without an image keeps the stored one.
    async fn update(&self, id: RecipeId, draft: &RecipeDraft)
    -> Result<(), RecipePersistenceError>;

    /// Delete the recipe. Returns `false` when it did not exist.
    async fn delete(&self, id: RecipeId) -> Result<bool, RecipePersistenceError>;

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipePersistenceError>;

    /// Author of the recipe, without loading related rows.
    async fn find_author(&self, id: RecipeId) -> Result<Option<UserId>, RecipePersistenceError>;

    async fn find_summary(
        &self,
        id: RecipeId,
    ) -> Result<Option<RecipeSummary>, RecipePersistenceError>;

    /// Matching recipes, newest first.
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Listing<Recipe>, RecipePersistenceError>;

    /// Newest recipes of `author`, at most `limit` of them when set, with the
    /// author's total recipe count.
    async fn summaries_by_author(
        &self,
        author: UserId,
        limit: Option<u32>,
    ) -> Result<Listing<RecipeSummary>, RecipePersistenceError>;
}
