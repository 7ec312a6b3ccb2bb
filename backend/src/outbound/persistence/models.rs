//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer. Conversions into domain
//! types re-run the domain validation so a corrupt row surfaces as a query
//! error instead of an invalid value.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Email, Ingredient, IngredientId, PersonName, RecipeId, RecipeImage, RecipeSummary, Tag,
    TagId, User, UserId, Username,
};

use super::schema::{follows, ingredients, recipe_ingredients, recipe_tags, recipes, tags, users};

/// Public profile columns of a user.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<User, String> {
        let id = self.id;
        let invalid =
            |err: crate::domain::UserValidationError| format!("stored user {id} is invalid: {err}");
        Ok(User {
            id: UserId::from_trusted(id),
            email: Email::new(self.email).map_err(invalid)?,
            username: Username::new(self.username).map_err(invalid)?,
            first_name: PersonName::new(self.first_name).map_err(invalid)?,
            last_name: PersonName::new(self.last_name).map_err(invalid)?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserCredentialsRow {
    pub id: i64,
    pub password_hash: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password_hash: &'a str,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = follows)]
pub(crate) struct NewFollowRow {
    pub user_id: i64,
    pub author_id: i64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IngredientRow {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Self {
            id: IngredientId::from_trusted(row.id),
            name: row.name,
            unit: row.measurement_unit,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ingredients)]
pub(crate) struct NewIngredientRow<'a> {
    pub name: &'a str,
    pub measurement_unit: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TagRow {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Self {
            id: TagId::from_trusted(row.id),
            name: row.name,
            color: row.color,
            slug: row.slug,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tags)]
pub(crate) struct NewTagRow<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub slug: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub image: Option<Vec<u8>>,
    pub image_mime: Option<String>,
    pub description: String,
    pub cooking_time: i32,
    pub pub_date: DateTime<Utc>,
}

/// Rebuild the optional image from its two columns.
pub(crate) fn image_from_columns(
    recipe_id: i64,
    image: Option<Vec<u8>>,
    image_mime: Option<String>,
) -> Result<Option<RecipeImage>, String> {
    match (image, image_mime) {
        (Some(bytes), Some(mime)) => RecipeImage::from_parts(mime, bytes)
            .map(Some)
            .map_err(|err| format!("stored image of recipe {recipe_id} is invalid: {err}")),
        _ => Ok(None),
    }
}

/// Columns needed for a short recipe card.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeSummaryRow {
    pub id: i64,
    pub title: String,
    pub image: Option<Vec<u8>>,
    pub image_mime: Option<String>,
    pub cooking_time: i32,
}

impl RecipeSummaryRow {
    pub(crate) fn into_domain(self) -> Result<RecipeSummary, String> {
        Ok(RecipeSummary {
            id: RecipeId::from_trusted(self.id),
            image: image_from_columns(self.id, self.image, self.image_mime)?,
            title: self.title,
            time: self.cooking_time,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub author_id: i64,
    pub title: &'a str,
    pub image: Option<&'a [u8]>,
    pub image_mime: Option<&'a str>,
    pub description: &'a str,
    pub cooking_time: i32,
}

/// Recipe columns replaced on update. `None` image fields are skipped, which
/// keeps the stored image.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeUpdate<'a> {
    pub title: &'a str,
    pub image: Option<&'a [u8]>,
    pub image_mime: Option<&'a str>,
    pub description: &'a str,
    pub cooking_time: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipe_ingredients)]
pub(crate) struct NewRecipeIngredientRow {
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub amount: i16,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipe_tags)]
pub(crate) struct NewRecipeTagRow {
    pub recipe_id: i64,
    pub tag_id: i64,
}
