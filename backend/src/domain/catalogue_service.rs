//! Tag and ingredient catalogue.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    CatalogueCommand, CatalogueQuery, IngredientRepository, TagPersistenceError, TagRepository,
};
use crate::domain::recipe_service::map_ingredient_error;
use crate::domain::{
    Error, Ingredient, IngredientDraft, IngredientFilter, IngredientId, Tag, TagDraft, TagId,
};

fn map_tag_error(error: TagPersistenceError) -> Error {
    match error {
        TagPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("tag repository unavailable: {message}"))
        }
        TagPersistenceError::Query { message } => {
            Error::internal(format!("tag repository error: {message}"))
        }
        TagPersistenceError::Duplicate { message } => {
            Error::already_exists(format!("tag already exists: {message}"))
        }
    }
}

/// Catalogue service implementing the tag and ingredient ports.
#[derive(Clone)]
pub struct CatalogueService<T, I> {
    tags: Arc<T>,
    ingredients: Arc<I>,
}

impl<T, I> CatalogueService<T, I> {
    pub fn new(tags: Arc<T>, ingredients: Arc<I>) -> Self {
        Self { tags, ingredients }
    }
}

#[async_trait]
impl<T, I> CatalogueCommand for CatalogueService<T, I>
where
    T: TagRepository,
    I: IngredientRepository,
{
    async fn create_tag(&self, draft: TagDraft) -> Result<Tag, Error> {
        let tag = self.tags.create(&draft).await.map_err(map_tag_error)?;
        info!(tag = %tag.id, slug = %tag.slug, "tag created");
        Ok(tag)
    }

    async fn create_ingredient(&self, draft: IngredientDraft) -> Result<Ingredient, Error> {
        let ingredient = self
            .ingredients
            .create(&draft)
            .await
            .map_err(map_ingredient_error)?;
        info!(ingredient = %ingredient.id, name = %ingredient.name, "ingredient created");
        Ok(ingredient)
    }
}

#[async_trait]
impl<T, I> CatalogueQuery for CatalogueService<T, I>
where
    T: TagRepository,
    I: IngredientRepository,
{
    async fn list_tags(&self) -> Result<Vec<Tag>, Error> {
        self.tags.list().await.map_err(map_tag_error)
    }

    async fn get_tag(&self, id: TagId) -> Result<Tag, Error> {
        self.tags
            .find_by_id(id)
            .await
            .map_err(map_tag_error)?
            .ok_or_else(|| Error::not_found(format!("tag {id} not found")))
    }

    async fn list_ingredients(&self, filter: IngredientFilter) -> Result<Vec<Ingredient>, Error> {
        self.ingredients
            .list(&filter)
            .await
            .map_err(map_ingredient_error)
    }

    async fn get_ingredient(&self, id: IngredientId) -> Result<Ingredient, Error> {
        self.ingredients
            .find_by_id(id)
            .await
            .map_err(map_ingredient_error)?
            .ok_or_else(|| Error::not_found(format!("ingredient {id} not found")))
    }
}
