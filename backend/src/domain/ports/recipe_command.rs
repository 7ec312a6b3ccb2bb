//! Driving port for publishing, editing and deleting recipes.

use async_trait::async_trait;

use crate::domain::{Error, RecipeDraft, RecipeId, RecipeView, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeCommand: Send + Sync {
    async fn create_recipe(&self, author: UserId, draft: RecipeDraft)
    -> Result<RecipeView, Error>;

    /// Replace a recipe; only its author may do so.
    async fn update_recipe(
        &self,
        user: UserId,
        id: RecipeId,
        draft: RecipeDraft,
    ) -> Result<RecipeView, Error>;

    /// Delete a recipe; only its author may do so.
    async fn delete_recipe(&self, user: UserId, id: RecipeId) -> Result<(), Error>;
}
