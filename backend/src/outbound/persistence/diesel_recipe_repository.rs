//! PostgreSQL-backed `RecipeRepository`.
//!
//! Create and update write the recipe row, its ingredient lines and its tag
//! links inside one transaction, so a failure part way leaves nothing
//! behind. Reads load a page of recipe rows first, then fetch authors,
//! ingredient lines and tags for the whole page in three batched queries.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use pagination::PageRequest;

use crate::domain::ports::{
    RecipeListPersistenceError, RecipeListRepository, RecipePersistenceError, RecipeRepository,
};
use crate::domain::{
    Amount, Ingredient, IngredientId, Listing, Recipe, RecipeDraft, RecipeFilter, RecipeId,
    RecipeIngredient, RecipeList, RecipeSummary, ShoppingListRow, Tag, TagDraft, User, UserId,
};

use super::diesel_error_mapping::RepositoryError;
use super::diesel_helpers::{count_to_u64, page_window};
use super::models::{
    IngredientRow, NewRecipeIngredientRow, NewRecipeRow, NewRecipeTagRow, NewTagRow,
    RecipeRow, RecipeSummaryRow, RecipeUpdate, TagRow, UserRow, image_from_columns,
};
use super::pool::DbPool;
use super::schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_cart, tags, users,
};

impl RepositoryError for RecipePersistenceError {
    fn from_connection(message: String) -> Self {
        Self::connection(message)
    }

    fn from_query(message: String) -> Self {
        Self::query(message)
    }

    fn from_unique_violation(constraint: Option<&str>, message: String) -> Self {
        match constraint {
            Some("recipes_title_description_key") => {
                Self::duplicate("a recipe with this title and description already exists")
            }
            Some("recipe_ingredients_ingredient_amount_key") => Self::duplicate(
                "another recipe already uses one of these ingredients in the same amount",
            ),
            Some("tags_name_key" | "tags_color_key") => {
                Self::duplicate("a different tag already uses this name or color")
            }
            _ => Self::query(message),
        }
    }
}

impl RepositoryError for RecipeListPersistenceError {
    fn from_connection(message: String) -> Self {
        Self::connection(message)
    }

    fn from_query(message: String) -> Self {
        Self::query(message)
    }
}

/// Run `$body` against the join table backing `$list`, bound as `$table`.
macro_rules! with_list_table {
    ($list:expr, $table:ident => $body:expr) => {
        match $list {
            RecipeList::Favorites => {
                use super::schema::favorites as $table;
                $body
            }
            RecipeList::ShoppingCart => {
                use super::schema::shopping_cart as $table;
                $body
            }
        }
    };
}

/// Narrow any boxed recipe query to the rows matching `filter`.
fn apply_filter<'a, ST: 'a>(
    mut query: recipes::BoxedQuery<'a, Pg, ST>,
    filter: &RecipeFilter,
) -> recipes::BoxedQuery<'a, Pg, ST> {
    if let Some(author) = filter.author {
        query = query.filter(recipes::author_id.eq(author.get()));
    }
    if !filter.tags.is_empty() {
        let tagged = recipe_tags::table
            .inner_join(tags::table)
            .filter(tags::slug.eq_any(filter.tags.clone()))
            .select(recipe_tags::recipe_id);
        query = query.filter(recipes::id.eq_any(tagged));
    }
    if let Some(user) = filter.favorited_by {
        let favorited = favorites::table
            .filter(favorites::user_id.eq(user.get()))
            .select(favorites::recipe_id);
        query = query.filter(recipes::id.eq_any(favorited));
    }
    if let Some(user) = filter.in_cart_of {
        let in_cart = shopping_cart::table
            .filter(shopping_cart::user_id.eq(user.get()))
            .select(shopping_cart::recipe_id);
        query = query.filter(recipes::id.eq_any(in_cart));
    }
    query
}

async fn insert_lines(
    conn: &mut AsyncPgConnection,
    recipe_id: i64,
    draft: &RecipeDraft,
) -> QueryResult<()> {
    let lines: Vec<NewRecipeIngredientRow> = draft
        .ingredients()
        .iter()
        .map(|(ingredient, amount)| NewRecipeIngredientRow {
            recipe_id,
            ingredient_id: ingredient.get(),
            amount: amount.get(),
        })
        .collect();
    diesel::insert_into(recipe_ingredients::table)
        .values(&lines)
        .execute(conn)
        .await?;
    Ok(())
}

/// Resolve each tag by slug, creating missing ones, and link them.
async fn link_tags(
    conn: &mut AsyncPgConnection,
    recipe_id: i64,
    drafts: &[TagDraft],
) -> QueryResult<()> {
    if drafts.is_empty() {
        return Ok(());
    }
    let new_tags: Vec<NewTagRow> = drafts
        .iter()
        .map(|tag| NewTagRow {
            name: tag.name(),
            color: tag.color(),
            slug: tag.slug(),
        })
        .collect();
    diesel::insert_into(tags::table)
        .values(&new_tags)
        .on_conflict(tags::slug)
        .do_nothing()
        .execute(conn)
        .await?;

    let slugs: Vec<&str> = drafts.iter().map(TagDraft::slug).collect();
    let tag_ids: Vec<i64> = tags::table
        .filter(tags::slug.eq_any(slugs))
        .select(tags::id)
        .load(conn)
        .await?;
    let links: Vec<NewRecipeTagRow> = tag_ids
        .into_iter()
        .map(|tag_id| NewRecipeTagRow { recipe_id, tag_id })
        .collect();
    diesel::insert_into(recipe_tags::table)
        .values(&links)
        .on_conflict((recipe_tags::recipe_id, recipe_tags::tag_id))
        .do_nothing()
        .execute(conn)
        .await?;
    Ok(())
}

/// Attach authors, ingredient lines and tags to a page of recipe rows,
/// keeping the order of `rows`.
async fn assemble(
    conn: &mut AsyncPgConnection,
    rows: Vec<RecipeRow>,
) -> Result<Vec<Recipe>, RecipePersistenceError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let author_ids: Vec<i64> = rows.iter().map(|row| row.author_id).collect();

    let authors: HashMap<i64, User> = users::table
        .filter(users::id.eq_any(author_ids))
        .select(UserRow::as_select())
        .load::<UserRow>(conn)
        .await
        .map_err(RecipePersistenceError::from_diesel)?
        .into_iter()
        .map(|row| {
            let user = row
                .into_domain()
                .map_err(RecipePersistenceError::from_corrupt_row)?;
            Ok((user.id.get(), user))
        })
        .collect::<Result<_, RecipePersistenceError>>()?;

    let mut lines: HashMap<i64, Vec<RecipeIngredient>> = HashMap::new();
    let line_rows: Vec<(i64, i16, IngredientRow)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(&ids))
        .order(recipe_ingredients::id.asc())
        .select((
            recipe_ingredients::recipe_id,
            recipe_ingredients::amount,
            IngredientRow::as_select(),
        ))
        .load(conn)
        .await
        .map_err(RecipePersistenceError::from_diesel)?;
    for (recipe_id, amount, ingredient) in line_rows {
        lines.entry(recipe_id).or_default().push(RecipeIngredient {
            ingredient: Ingredient::from(ingredient),
            amount: Amount::from_trusted(amount),
        });
    }

    let mut tag_map: HashMap<i64, Vec<Tag>> = HashMap::new();
    let tag_rows: Vec<(i64, TagRow)> = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq_any(&ids))
        .order(tags::id.asc())
        .select((recipe_tags::recipe_id, TagRow::as_select()))
        .load(conn)
        .await
        .map_err(RecipePersistenceError::from_diesel)?;
    for (recipe_id, tag) in tag_rows {
        tag_map.entry(recipe_id).or_default().push(Tag::from(tag));
    }

    rows.into_iter()
        .map(|row| {
            let author = authors.get(&row.author_id).cloned().ok_or_else(|| {
                RecipePersistenceError::from_corrupt_row(format!(
                    "author of recipe {} is missing",
                    row.id
                ))
            })?;
            Ok(Recipe {
                id: RecipeId::from_trusted(row.id),
                author,
                image: image_from_columns(row.id, row.image, row.image_mime)
                    .map_err(RecipePersistenceError::from_corrupt_row)?,
                title: row.title,
                description: row.description,
                ingredients: lines.remove(&row.id).unwrap_or_default(),
                tags: tag_map.remove(&row.id).unwrap_or_default(),
                time: row.cooking_time,
                pub_date: row.pub_date,
            })
        })
        .collect()
}

/// Diesel-backed recipe storage.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn create(
        &self,
        author: UserId,
        draft: &RecipeDraft,
    ) -> Result<RecipeId, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(RecipePersistenceError::from_pool)?;
        let id = conn
            .transaction(|conn| {
                async move {
                    let image = draft.image();
                    let id: i64 = diesel::insert_into(recipes::table)
                        .values(&NewRecipeRow {
                            author_id: author.get(),
                            title: draft.title(),
                            image: image.map(|image| image.bytes()),
                            image_mime: image.map(|image| image.mime()),
                            description: draft.description(),
                            cooking_time: draft.time(),
                        })
                        .returning(recipes::id)
                        .get_result(conn)
                        .await?;
                    insert_lines(conn, id, draft).await?;
                    link_tags(conn, id, draft.tags()).await?;
                    Ok(id)
                }
                .scope_boxed()
            })
            .await
            .map_err(RecipePersistenceError::from_diesel)?;
        Ok(RecipeId::from_trusted(id))
    }

    async fn update(
        &self,
        id: RecipeId,
        draft: &RecipeDraft,
    ) -> Result<(), RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(RecipePersistenceError::from_pool)?;
        let recipe_id = id.get();
        let found = conn
            .transaction(|conn| {
                async move {
                    let image = draft.image();
                    let updated = diesel::update(recipes::table.find(recipe_id))
                        .set(&RecipeUpdate {
                            title: draft.title(),
                            image: image.map(|image| image.bytes()),
                            image_mime: image.map(|image| image.mime()),
                            description: draft.description(),
                            cooking_time: draft.time(),
                        })
                        .execute(conn)
                        .await?;
                    if updated == 0 {
                        return Ok(false);
                    }
                    diesel::delete(
                        recipe_ingredients::table
                            .filter(recipe_ingredients::recipe_id.eq(recipe_id)),
                    )
                    .execute(conn)
                    .await?;
                    insert_lines(conn, recipe_id, draft).await?;
                    diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(recipe_id)))
                        .execute(conn)
                        .await?;
                    link_tags(conn, recipe_id, draft.tags()).await?;
                    Ok(true)
                }
                .scope_boxed()
            })
            .await
            .map_err(RecipePersistenceError::from_diesel)?;
        if !found {
            return Err(RecipePersistenceError::not_found(recipe_id));
        }
        Ok(())
    }

    async fn delete(&self, id: RecipeId) -> Result<bool, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(RecipePersistenceError::from_pool)?;
        let deleted = diesel::delete(recipes::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(RecipePersistenceError::from_diesel)?;
        Ok(deleted > 0)
    }

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(RecipePersistenceError::from_pool)?;
        let row: Option<RecipeRow> = recipes::table
            .find(id.get())
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(RecipePersistenceError::from_diesel)?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(assemble(&mut conn, vec![row]).await?.pop())
    }

    async fn find_author(&self, id: RecipeId) -> Result<Option<UserId>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(RecipePersistenceError::from_pool)?;
        let author: Option<i64> = recipes::table
            .find(id.get())
            .select(recipes::author_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(RecipePersistenceError::from_diesel)?;
        Ok(author.map(UserId::from_trusted))
    }

    async fn find_summary(
        &self,
        id: RecipeId,
    ) -> Result<Option<RecipeSummary>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(RecipePersistenceError::from_pool)?;
        let row: Option<RecipeSummaryRow> = recipes::table
            .find(id.get())
            .select(RecipeSummaryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(RecipePersistenceError::from_diesel)?;
        row.map(|row| row.into_domain().map_err(RecipePersistenceError::from_corrupt_row))
            .transpose()
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Listing<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(RecipePersistenceError::from_pool)?;
        let (offset, limit) = page_window(page);
        let total: i64 = apply_filter(recipes::table.select(count_star()).into_boxed(), filter)
            .get_result(&mut conn)
            .await
            .map_err(RecipePersistenceError::from_diesel)?;
        let rows: Vec<RecipeRow> =
            apply_filter(recipes::table.select(RecipeRow::as_select()).into_boxed(), filter)
                .order((recipes::pub_date.desc(), recipes::id.desc()))
                .offset(offset)
                .limit(limit)
                .load(&mut conn)
                .await
                .map_err(RecipePersistenceError::from_diesel)?;
        let recipes = assemble(&mut conn, rows).await?;
        Ok(Listing::new(recipes, count_to_u64(total)))
    }

    async fn summaries_by_author(
        &self,
        author: UserId,
        limit: Option<u32>,
    ) -> Result<Listing<RecipeSummary>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(RecipePersistenceError::from_pool)?;
        let total: i64 = recipes::table
            .filter(recipes::author_id.eq(author.get()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(RecipePersistenceError::from_diesel)?;
        let mut query = recipes::table
            .filter(recipes::author_id.eq(author.get()))
            .order((recipes::pub_date.desc(), recipes::id.desc()))
            .select(RecipeSummaryRow::as_select())
            .into_boxed();
        if let Some(limit) = limit {
            query = query.limit(i64::from(limit));
        }
        let rows: Vec<RecipeSummaryRow> =
            query.load(&mut conn).await.map_err(RecipePersistenceError::from_diesel)?;
        let summaries = rows
            .into_iter()
            .map(|row| row.into_domain().map_err(RecipePersistenceError::from_corrupt_row))
            .collect::<Result<Vec<_>, RecipePersistenceError>>()?;
        Ok(Listing::new(summaries, count_to_u64(total)))
    }
}

#[async_trait]
impl RecipeListRepository for DieselRecipeRepository {
    async fn add(
        &self,
        list: RecipeList,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<bool, RecipeListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(RecipeListPersistenceError::from_pool)?;
        let inserted = with_list_table!(list, entries => {
            diesel::insert_into(entries::table)
                .values((
                    entries::user_id.eq(user.get()),
                    entries::recipe_id.eq(recipe.get()),
                ))
                .on_conflict((entries::user_id, entries::recipe_id))
                .do_nothing()
                .execute(&mut conn)
                .await
        })
        .map_err(RecipeListPersistenceError::from_diesel)?;
        Ok(inserted > 0)
    }

    async fn remove(
        &self,
        list: RecipeList,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<bool, RecipeListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(RecipeListPersistenceError::from_pool)?;
        let deleted = with_list_table!(list, entries => {
            diesel::delete(
                entries::table
                    .filter(entries::user_id.eq(user.get()))
                    .filter(entries::recipe_id.eq(recipe.get())),
            )
            .execute(&mut conn)
            .await
        })
        .map_err(RecipeListPersistenceError::from_diesel)?;
        Ok(deleted > 0)
    }

    async fn contained(
        &self,
        list: RecipeList,
        user: UserId,
        recipes: &[RecipeId],
    ) -> Result<Vec<RecipeId>, RecipeListPersistenceError> {
        if recipes.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = recipes.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(RecipeListPersistenceError::from_pool)?;
        let found: Vec<i64> = with_list_table!(list, entries => {
            entries::table
                .filter(entries::user_id.eq(user.get()))
                .filter(entries::recipe_id.eq_any(&ids))
                .select(entries::recipe_id)
                .load(&mut conn)
                .await
        })
        .map_err(RecipeListPersistenceError::from_diesel)?;
        Ok(found.into_iter().map(RecipeId::from_trusted).collect())
    }

    async fn shopping_rows(
        &self,
        user: UserId,
    ) -> Result<Vec<ShoppingListRow>, RecipeListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(RecipeListPersistenceError::from_pool)?;
        let rows: Vec<(i64, String, String, i16)> = shopping_cart::table
            .inner_join(
                recipe_ingredients::table
                    .on(recipe_ingredients::recipe_id.eq(shopping_cart::recipe_id)),
            )
            .inner_join(
                ingredients::table.on(ingredients::id.eq(recipe_ingredients::ingredient_id)),
            )
            .filter(shopping_cart::user_id.eq(user.get()))
            .select((
                ingredients::id,
                ingredients::name,
                ingredients::measurement_unit,
                recipe_ingredients::amount,
            ))
            .load(&mut conn)
            .await
            .map_err(RecipeListPersistenceError::from_diesel)?;
        Ok(rows
            .into_iter()
            .map(|(id, name, unit, amount)| ShoppingListRow {
                ingredient_id: IngredientId::from_trusted(id),
                name,
                unit,
                amount,
            })
            .collect())
    }
}
