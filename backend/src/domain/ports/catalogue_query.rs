//! Driving port for reading tags and ingredients.

use async_trait::async_trait;

use crate::domain::{Error, Ingredient, IngredientFilter, IngredientId, Tag, TagId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    async fn list_tags(&self) -> Result<Vec<Tag>, Error>;

    async fn get_tag(&self, id: TagId) -> Result<Tag, Error>;

    async fn list_ingredients(&self, filter: IngredientFilter) -> Result<Vec<Ingredient>, Error>;

    async fn get_ingredient(&self, id: IngredientId) -> Result<Ingredient, Error>;
}
