//! Port for the ingredient catalogue.
use async_trait::async_trait;

use crate::domain::{Ingredient, IngredientDraft, IngredientFilter, IngredientId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by ingredient repository adapters.
    pub enum IngredientPersistenceError {
        Connection { message: String } => "ingredient repository connection failed: {message}",
        Query { message: String } => "ingredient repository query failed: {message}",
        /// The (name, unit) pair is already catalogued.
        Duplicate { message: String } => "ingredient already exists: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    async fn create(&self, draft: &IngredientDraft)
    -> Result<Ingredient, IngredientPersistenceError>;

    async fn find_by_id(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, IngredientPersistenceError>;

    /// Ingredients among `ids` that exist; unknown ids are skipped.
    async fn find_many(
        &self,
        ids: &[IngredientId],
    ) -> Result<Vec<Ingredient>, IngredientPersistenceError>;

    /// Ingredients matching `filter`, ordered by name.
    async fn list(
        &self,
        filter: &IngredientFilter,
    ) -> Result<Vec<Ingredient>, IngredientPersistenceError>;
}
