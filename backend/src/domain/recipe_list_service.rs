//! Favourites, shopping cart and the shopping list download.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    RecipeListCommand, RecipeListRepository, RecipeRepository, ShoppingListQuery,
};
use crate::domain::recipe_service::{map_list_error, map_recipe_error};
use crate::domain::{Error, RecipeId, RecipeList, RecipeSummary, ShoppingList, UserId};

/// Service implementing the per-user recipe list ports.
#[derive(Clone)]
pub struct RecipeListService<R, L> {
    recipes: Arc<R>,
    lists: Arc<L>,
}

impl<R, L> RecipeListService<R, L> {
    pub fn new(recipes: Arc<R>, lists: Arc<L>) -> Self {
        Self { recipes, lists }
    }
}

#[async_trait]
impl<R, L> RecipeListCommand for RecipeListService<R, L>
where
    R: RecipeRepository,
    L: RecipeListRepository,
{
    async fn add_to_list(
        &self,
        list: RecipeList,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<RecipeSummary, Error> {
        let summary = self
            .recipes
            .find_summary(recipe)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| Error::not_found(format!("recipe {recipe} not found")))?;
        let added = self
            .lists
            .add(list, user, recipe)
            .await
            .map_err(map_list_error)?;
        if !added {
            return Err(Error::already_exists(list.already_present_message()));
        }
        info!(%user, %recipe, %list, "recipe added to list");
        Ok(summary)
    }

    async fn remove_from_list(
        &self,
        list: RecipeList,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<(), Error> {
        let removed = self
            .lists
            .remove(list, user, recipe)
            .await
            .map_err(map_list_error)?;
        if !removed {
            return Err(Error::not_found(list.missing_message()));
        }
        info!(%user, %recipe, %list, "recipe removed from list");
        Ok(())
    }
}

#[async_trait]
impl<R, L> ShoppingListQuery for RecipeListService<R, L>
where
    R: RecipeRepository,
    L: RecipeListRepository,
{
    async fn shopping_list(&self, user: UserId) -> Result<ShoppingList, Error> {
        let rows = self
            .lists
            .shopping_rows(user)
            .await
            .map_err(map_list_error)?;
        debug!(%user, rows = rows.len(), "aggregating shopping list");
        Ok(ShoppingList::aggregate(rows))
    }
}

#[cfg(test)]
#[path = "recipe_list_service_tests.rs"]
mod tests;
