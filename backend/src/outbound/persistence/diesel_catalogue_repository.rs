//! PostgreSQL-backed tag and ingredient catalogue.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    IngredientPersistenceError, IngredientRepository, TagPersistenceError, TagRepository,
};
use crate::domain::{
    Ingredient, IngredientDraft, IngredientFilter, IngredientId, Tag, TagDraft, TagId,
};

use super::diesel_error_mapping::RepositoryError;
use super::models::{IngredientRow, NewIngredientRow, NewTagRow, TagRow};
use super::pool::DbPool;
use super::schema::{ingredients, tags};

impl RepositoryError for IngredientPersistenceError {
    fn from_connection(message: String) -> Self {
        Self::connection(message)
    }

    fn from_query(message: String) -> Self {
        Self::query(message)
    }

    fn from_unique_violation(constraint: Option<&str>, message: String) -> Self {
        match constraint {
            Some("ingredients_name_unit_key") => Self::duplicate("name and unit are taken"),
            _ => Self::query(message),
        }
    }
}

impl RepositoryError for TagPersistenceError {
    fn from_connection(message: String) -> Self {
        Self::connection(message)
    }

    fn from_query(message: String) -> Self {
        Self::query(message)
    }

    fn from_unique_violation(constraint: Option<&str>, message: String) -> Self {
        match constraint {
            Some("tags_name_key") => Self::duplicate("name is taken"),
            Some("tags_color_key") => Self::duplicate("color is taken"),
            Some("tags_slug_key") => Self::duplicate("slug is taken"),
            _ => Self::query(message),
        }
    }
}

/// Escape `LIKE` wildcards so user input matches literally.
pub(crate) fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Diesel-backed catalogue of tags and ingredients.
#[derive(Clone)]
pub struct DieselCatalogueRepository {
    pool: DbPool,
}

impl DieselCatalogueRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IngredientRepository for DieselCatalogueRepository {
    async fn create(
        &self,
        draft: &IngredientDraft,
    ) -> Result<Ingredient, IngredientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(IngredientPersistenceError::from_pool)?;
        let row: IngredientRow = diesel::insert_into(ingredients::table)
            .values(&NewIngredientRow {
                name: draft.name(),
                measurement_unit: draft.unit(),
            })
            .returning(IngredientRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(IngredientPersistenceError::from_diesel)?;
        Ok(row.into())
    }

    async fn find_by_id(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, IngredientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(IngredientPersistenceError::from_pool)?;
        let row: Option<IngredientRow> = ingredients::table
            .find(id.get())
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(IngredientPersistenceError::from_diesel)?;
        Ok(row.map(Into::into))
    }

    async fn find_many(
        &self,
        ids: &[IngredientId],
    ) -> Result<Vec<Ingredient>, IngredientPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(IngredientPersistenceError::from_pool)?;
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let rows: Vec<IngredientRow> = ingredients::table
            .filter(ingredients::id.eq_any(raw))
            .select(IngredientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(IngredientPersistenceError::from_diesel)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list(
        &self,
        filter: &IngredientFilter,
    ) -> Result<Vec<Ingredient>, IngredientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(IngredientPersistenceError::from_pool)?;
        let mut query = ingredients::table
            .select(IngredientRow::as_select())
            .order((ingredients::name.asc(), ingredients::id.asc()))
            .into_boxed();
        if let Some(prefix) = filter.start_name() {
            query = query.filter(ingredients::name.ilike(format!("{}%", escape_like(prefix))));
        }
        if let Some(needle) = filter.contain_name() {
            query = query.filter(ingredients::name.ilike(format!("%{}%", escape_like(needle))));
        }
        let rows: Vec<IngredientRow> = query
            .load(&mut conn)
            .await
            .map_err(IngredientPersistenceError::from_diesel)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TagRepository for DieselCatalogueRepository {
    async fn create(&self, draft: &TagDraft) -> Result<Tag, TagPersistenceError> {
        let mut conn = self.pool.get().await.map_err(TagPersistenceError::from_pool)?;
        let row: TagRow = diesel::insert_into(tags::table)
            .values(&NewTagRow {
                name: draft.name(),
                color: draft.color(),
                slug: draft.slug(),
            })
            .returning(TagRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(TagPersistenceError::from_diesel)?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, TagPersistenceError> {
        let mut conn = self.pool.get().await.map_err(TagPersistenceError::from_pool)?;
        let row: Option<TagRow> = tags::table
            .find(id.get())
            .select(TagRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(TagPersistenceError::from_diesel)?;
        Ok(row.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Tag>, TagPersistenceError> {
        let mut conn = self.pool.get().await.map_err(TagPersistenceError::from_pool)?;
        let rows: Vec<TagRow> = tags::table
            .order(tags::id.asc())
            .select(TagRow::as_select())
            .load(&mut conn)
            .await
            .map_err(TagPersistenceError::from_diesel)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
