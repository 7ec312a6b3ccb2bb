//! Request and response payloads for recipe endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Amount, Error, IngredientId, RecipeDraft, RecipeImage, RecipeIngredient, RecipeSummary,
    RecipeView, TagDraft,
};
use crate::inbound::http::tags::{TagRequest, TagResponse};
use crate::inbound::http::users::UserResponse;
use crate::inbound::http::validation::{
    FieldName, image_validation_error, invalid_field, missing_field_error,
    recipe_validation_error,
};

/// An ingredient line of a recipe.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeIngredientResponse {
    pub id: i64,
    #[schema(example = "flour")]
    pub name: String,
    #[schema(example = "g")]
    pub unit: String,
    #[schema(example = 200)]
    pub amount: i16,
}

impl From<RecipeIngredient> for RecipeIngredientResponse {
    fn from(line: RecipeIngredient) -> Self {
        Self {
            id: line.ingredient.id.get(),
            name: line.ingredient.name,
            unit: line.ingredient.unit,
            amount: line.amount.get(),
        }
    }
}

/// A full recipe as seen by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeResponse {
    pub id: i64,
    pub author: UserResponse,
    pub title: String,
    /// `data:image/<type>;base64,...` or null.
    pub image: Option<String>,
    pub description: String,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub tags: Vec<TagResponse>,
    /// Cooking time in minutes.
    pub time: i32,
    pub pub_date: DateTime<Utc>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl From<RecipeView> for RecipeResponse {
    fn from(view: RecipeView) -> Self {
        let RecipeView {
            recipe,
            author,
            is_favorited,
            is_in_shopping_cart,
        } = view;
        Self {
            id: recipe.id.get(),
            author: UserResponse::from(author),
            title: recipe.title,
            image: recipe.image.as_ref().map(RecipeImage::to_data_uri),
            description: recipe.description,
            ingredients: recipe
                .ingredients
                .into_iter()
                .map(RecipeIngredientResponse::from)
                .collect(),
            tags: recipe.tags.into_iter().map(TagResponse::from).collect(),
            time: recipe.time,
            pub_date: recipe.pub_date,
            is_favorited,
            is_in_shopping_cart,
        }
    }
}

/// Short recipe card returned by list actions and subscription previews.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShortRecipeResponse {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub time: i32,
}

impl From<RecipeSummary> for ShortRecipeResponse {
    fn from(summary: RecipeSummary) -> Self {
        Self {
            id: summary.id.get(),
            title: summary.title,
            image: summary.image.as_ref().map(RecipeImage::to_data_uri),
            time: summary.time,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct IngredientAmountRequest {
    /// Catalogue ingredient identifier.
    pub id: i64,
    #[schema(minimum = 1, maximum = 32767)]
    pub amount: i64,
}

/// Create and replace payload.
///
/// On replace, an omitted `image` keeps the stored one.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct RecipeWriteRequest {
    pub title: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub time: Option<i64>,
    pub ingredients: Option<Vec<IngredientAmountRequest>>,
    pub tags: Option<Vec<TagRequest>>,
}

pub(crate) fn parse_recipe_request(payload: RecipeWriteRequest) -> Result<RecipeDraft, Error> {
    const TITLE: FieldName = FieldName::new("title");
    const DESCRIPTION: FieldName = FieldName::new("description");
    const TIME: FieldName = FieldName::new("time");
    const INGREDIENTS: FieldName = FieldName::new("ingredients");

    let RecipeWriteRequest {
        title,
        image,
        description,
        time,
        ingredients,
        tags,
    } = payload;
    let title = title.ok_or_else(|| missing_field_error(TITLE))?;
    let description = description.ok_or_else(|| missing_field_error(DESCRIPTION))?;
    let time = time.ok_or_else(|| missing_field_error(TIME))?;
    let image = image
        .as_deref()
        .map(RecipeImage::from_data_uri)
        .transpose()
        .map_err(image_validation_error)?;
    let ingredients = ingredients
        .ok_or_else(|| missing_field_error(INGREDIENTS))?
        .into_iter()
        .map(parse_ingredient_amount)
        .collect::<Result<Vec<_>, _>>()?;
    let tags = tags
        .unwrap_or_default()
        .into_iter()
        .map(TagDraft::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    RecipeDraft::new(&title, image, &description, time, ingredients, tags)
        .map_err(recipe_validation_error)
}

fn parse_ingredient_amount(line: IngredientAmountRequest) -> Result<(IngredientId, Amount), Error> {
    let id = IngredientId::new(line.id).map_err(|err| {
        invalid_field(FieldName::new("ingredients"), "invalid_id", err)
    })?;
    let amount = Amount::new(line.amount).map_err(recipe_validation_error)?;
    Ok((id, amount))
}
