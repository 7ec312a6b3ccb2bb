//! Driving port for adding tags and ingredients to the catalogue.

use async_trait::async_trait;

use crate::domain::{Error, Ingredient, IngredientDraft, Tag, TagDraft};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueCommand: Send + Sync {
    async fn create_tag(&self, draft: TagDraft) -> Result<Tag, Error>;

    async fn create_ingredient(&self, draft: IngredientDraft) -> Result<Ingredient, Error>;
}
