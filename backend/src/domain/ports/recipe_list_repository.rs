//! Port for favourites and shopping cart entries.
use async_trait::async_trait;

use crate::domain::{RecipeId, RecipeList, ShoppingListRow, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by recipe list adapters.
    pub enum RecipeListPersistenceError {
        Connection { message: String } => "recipe list repository connection failed: {message}",
        Query { message: String } => "recipe list repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeListRepository: Send + Sync {
    /// Put the recipe on the list. Returns `false` when it was already there.
    async fn add(
        &self,
        list: RecipeList,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<bool, RecipeListPersistenceError>;

    /// Take the recipe off the list. Returns `false` when it was not there.
    async fn remove(
        &self,
        list: RecipeList,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<bool, RecipeListPersistenceError>;

    /// The subset of `recipes` on the user's list.
    async fn contained(
        &self,
        list: RecipeList,
        user: UserId,
        recipes: &[RecipeId],
    ) -> Result<Vec<RecipeId>, RecipeListPersistenceError>;

    /// One row per ingredient line of every recipe in the user's cart.
    async fn shopping_rows(
        &self,
        user: UserId,
    ) -> Result<Vec<ShoppingListRow>, RecipeListPersistenceError>;
}
