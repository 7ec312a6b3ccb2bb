//! Driving port for favourite and shopping cart actions.

use async_trait::async_trait;

use crate::domain::{Error, RecipeId, RecipeList, RecipeSummary, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeListCommand: Send + Sync {
    /// Add a recipe to the user's list and return its summary.
    async fn add_to_list(
        &self,
        list: RecipeList,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<RecipeSummary, Error>;

    async fn remove_from_list(
        &self,
        list: RecipeList,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<(), Error>;
}
