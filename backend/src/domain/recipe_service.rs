//! Recipe publishing and browsing.
//!
//! Read models are built per [`Viewer`]: favourite, cart and subscription
//! flags are looked up in bulk for the recipes on the page and stay false
//! for anonymous viewers.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageRequest;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    FollowRepository, IngredientPersistenceError, IngredientRepository, RecipeCommand,
    RecipeListPersistenceError, RecipeListRepository, RecipePersistenceError, RecipeQuery,
    RecipeRepository, RecipeSearch,
};
use crate::domain::user_service::map_follow_error;
use crate::domain::{
    Error, IngredientId, Listing, Recipe, RecipeDraft, RecipeFilter, RecipeId, RecipeList,
    RecipeView, UserId, UserView, Viewer,
};

pub(crate) fn map_recipe_error(error: RecipePersistenceError) -> Error {
    match error {
        RecipePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("recipe repository unavailable: {message}"))
        }
        RecipePersistenceError::Query { message } => {
            Error::internal(format!("recipe repository error: {message}"))
        }
        RecipePersistenceError::Duplicate { message } => Error::already_exists(message),
        RecipePersistenceError::NotFound { id } => {
            Error::not_found(format!("recipe {id} not found"))
        }
    }
}

pub(crate) fn map_list_error(error: RecipeListPersistenceError) -> Error {
    match error {
        RecipeListPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("recipe list repository unavailable: {message}"))
        }
        RecipeListPersistenceError::Query { message } => {
            Error::internal(format!("recipe list repository error: {message}"))
        }
    }
}

pub(crate) fn map_ingredient_error(error: IngredientPersistenceError) -> Error {
    match error {
        IngredientPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("ingredient repository unavailable: {message}"))
        }
        IngredientPersistenceError::Query { message } => {
            Error::internal(format!("ingredient repository error: {message}"))
        }
        IngredientPersistenceError::Duplicate { message } => {
            Error::already_exists(format!("ingredient already exists: {message}"))
        }
    }
}

fn recipe_not_found(id: RecipeId) -> Error {
    Error::not_found(format!("recipe {id} not found"))
}

/// Recipe service implementing the recipe command and query ports.
#[derive(Clone)]
pub struct RecipeService<R, L, F, I> {
    recipes: Arc<R>,
    lists: Arc<L>,
    follows: Arc<F>,
    ingredients: Arc<I>,
}

impl<R, L, F, I> RecipeService<R, L, F, I> {
    pub fn new(recipes: Arc<R>, lists: Arc<L>, follows: Arc<F>, ingredients: Arc<I>) -> Self {
        Self {
            recipes,
            lists,
            follows,
            ingredients,
        }
    }
}

impl<R, L, F, I> RecipeService<R, L, F, I>
where
    R: RecipeRepository,
    L: RecipeListRepository,
    F: FollowRepository,
    I: IngredientRepository,
{
    async fn views(&self, viewer: Viewer, recipes: Vec<Recipe>) -> Result<Vec<RecipeView>, Error> {
        let Some(me) = viewer.user_id().filter(|_| !recipes.is_empty()) else {
            return Ok(recipes
                .into_iter()
                .map(|recipe| RecipeView {
                    author: UserView {
                        user: recipe.author.clone(),
                        is_subscribed: false,
                    },
                    recipe,
                    is_favorited: false,
                    is_in_shopping_cart: false,
                })
                .collect());
        };

        let ids: Vec<RecipeId> = recipes.iter().map(|recipe| recipe.id).collect();
        let authors: Vec<UserId> = recipes
            .iter()
            .map(|recipe| recipe.author.id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let favorited: HashSet<RecipeId> = self
            .lists
            .contained(RecipeList::Favorites, me, &ids)
            .await
            .map_err(map_list_error)?
            .into_iter()
            .collect();
        let in_cart: HashSet<RecipeId> = self
            .lists
            .contained(RecipeList::ShoppingCart, me, &ids)
            .await
            .map_err(map_list_error)?
            .into_iter()
            .collect();
        let followed: HashSet<UserId> = self
            .follows
            .followed_among(me, &authors)
            .await
            .map_err(map_follow_error)?
            .into_iter()
            .collect();

        Ok(recipes
            .into_iter()
            .map(|recipe| RecipeView {
                author: UserView {
                    user: recipe.author.clone(),
                    is_subscribed: followed.contains(&recipe.author.id),
                },
                is_favorited: favorited.contains(&recipe.id),
                is_in_shopping_cart: in_cart.contains(&recipe.id),
                recipe,
            })
            .collect())
    }

    async fn view(&self, viewer: Viewer, recipe: Recipe) -> Result<RecipeView, Error> {
        self.views(viewer, vec![recipe])
            .await?
            .pop()
            .ok_or_else(|| Error::internal("recipe view was not built"))
    }

    async fn load(&self, id: RecipeId) -> Result<Recipe, Error> {
        self.recipes
            .find_by_id(id)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| recipe_not_found(id))
    }

    /// Reject drafts naming ingredients that are not catalogued.
    async fn ensure_ingredients_exist(&self, draft: &RecipeDraft) -> Result<(), Error> {
        let wanted: Vec<IngredientId> = draft.ingredients().iter().map(|(id, _)| *id).collect();
        let found: HashSet<IngredientId> = self
            .ingredients
            .find_many(&wanted)
            .await
            .map_err(map_ingredient_error)?
            .into_iter()
            .map(|ingredient| ingredient.id)
            .collect();
        match wanted.into_iter().find(|id| !found.contains(id)) {
            Some(missing) => Err(
                Error::invalid_request(format!("ingredient {missing} does not exist"))
                    .with_details(json!({
                        "field": "ingredients",
                        "code": "does_not_exist",
                        "value": missing.get(),
                    })),
            ),
            None => Ok(()),
        }
    }

    /// Load the recipe's author and require it to be `user`.
    async fn ensure_author(&self, user: UserId, id: RecipeId) -> Result<(), Error> {
        let author = self
            .recipes
            .find_author(id)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| recipe_not_found(id))?;
        if author != user {
            warn!(%user, recipe = %id, "write attempt by non-author");
            return Err(Error::forbidden("only the author may change this recipe"));
        }
        Ok(())
    }
}

#[async_trait]
impl<R, L, F, I> RecipeCommand for RecipeService<R, L, F, I>
where
    R: RecipeRepository,
    L: RecipeListRepository,
    F: FollowRepository,
    I: IngredientRepository,
{
    async fn create_recipe(
        &self,
        author: UserId,
        draft: RecipeDraft,
    ) -> Result<RecipeView, Error> {
        self.ensure_ingredients_exist(&draft).await?;
        let id = self
            .recipes
            .create(author, &draft)
            .await
            .map_err(map_recipe_error)?;
        info!(recipe = %id, %author, "recipe created");
        let recipe = self.load(id).await?;
        self.view(Viewer::Authenticated(author), recipe).await
    }

    async fn update_recipe(
        &self,
        user: UserId,
        id: RecipeId,
        draft: RecipeDraft,
    ) -> Result<RecipeView, Error> {
        self.ensure_author(user, id).await?;
        self.ensure_ingredients_exist(&draft).await?;
        self.recipes
            .update(id, &draft)
            .await
            .map_err(map_recipe_error)?;
        info!(recipe = %id, "recipe updated");
        let recipe = self.load(id).await?;
        self.view(Viewer::Authenticated(user), recipe).await
    }

    async fn delete_recipe(&self, user: UserId, id: RecipeId) -> Result<(), Error> {
        self.ensure_author(user, id).await?;
        if !self.recipes.delete(id).await.map_err(map_recipe_error)? {
            return Err(recipe_not_found(id));
        }
        info!(recipe = %id, "recipe deleted");
        Ok(())
    }
}

#[async_trait]
impl<R, L, F, I> RecipeQuery for RecipeService<R, L, F, I>
where
    R: RecipeRepository,
    L: RecipeListRepository,
    F: FollowRepository,
    I: IngredientRepository,
{
    async fn list_recipes(
        &self,
        viewer: Viewer,
        search: RecipeSearch,
        page: PageRequest,
    ) -> Result<Listing<RecipeView>, Error> {
        let wants_own_lists = search.only_favorited || search.only_in_shopping_cart;
        if wants_own_lists && viewer.user_id().is_none() {
            debug!("anonymous list filter yields no recipes");
            return Ok(Listing::empty());
        }
        let filter = RecipeFilter {
            author: search.author,
            tags: search.tags,
            favorited_by: viewer.user_id().filter(|_| search.only_favorited),
            in_cart_of: viewer.user_id().filter(|_| search.only_in_shopping_cart),
        };
        let listing = self
            .recipes
            .list(&filter, page)
            .await
            .map_err(map_recipe_error)?;
        let items = self.views(viewer, listing.items).await?;
        Ok(Listing::new(items, listing.total))
    }

    async fn get_recipe(&self, viewer: Viewer, id: RecipeId) -> Result<RecipeView, Error> {
        let recipe = self.load(id).await?;
        self.view(viewer, recipe).await
    }
}

#[cfg(test)]
#[path = "recipe_service_tests.rs"]
mod tests;
