//! Recipes, their ingredient lines and the views built from them.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};

use super::{Ingredient, IngredientId, RecipeImage, Tag, TagDraft, User, UserId, UserView};

/// Maximum length of a recipe title, in characters.
pub const TITLE_MAX: usize = 64;
/// Smallest accepted ingredient amount.
pub const AMOUNT_MIN: i64 = 1;
/// Largest accepted ingredient amount (Postgres `SMALLINT`).
pub const AMOUNT_MAX: i64 = 32_767;

/// Validation errors for recipe writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeValidationError {
    InvalidId,
    EmptyTitle,
    TitleTooLong { max: usize },
    EmptyDescription,
    InvalidCookingTime,
    NoIngredients,
    AmountOutOfRange { min: i64, max: i64 },
    DuplicateIngredient { id: IngredientId },
}

impl fmt::Display for RecipeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "recipe id must be a positive integer"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::InvalidCookingTime => write!(f, "cooking time must be at least one minute"),
            Self::NoIngredients => write!(f, "a recipe needs at least one ingredient"),
            Self::AmountOutOfRange { min, max } => {
                write!(f, "amount must be between {min} and {max}")
            }
            Self::DuplicateIngredient { id } => {
                write!(f, "ingredient {id} is listed more than once")
            }
        }
    }
}

impl std::error::Error for RecipeValidationError {}

/// Identifier of a recipe row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeId(i64);

impl RecipeId {
    pub fn new(id: i64) -> Result<Self, RecipeValidationError> {
        if id <= 0 {
            return Err(RecipeValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    pub(crate) const fn from_trusted(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quantity of one ingredient in a recipe, in the ingredient's unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Amount(i16);

impl Amount {
    pub fn new(value: i64) -> Result<Self, RecipeValidationError> {
        i16::try_from(value)
            .ok()
            .filter(|amount| i64::from(*amount) >= AMOUNT_MIN)
            .map(Self)
            .ok_or(RecipeValidationError::AmountOutOfRange {
                min: AMOUNT_MIN,
                max: AMOUNT_MAX,
            })
    }

    pub(crate) const fn from_trusted(value: i16) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i16 {
        self.0
    }
}

/// An ingredient together with the amount a recipe calls for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub amount: Amount,
}

/// A published recipe with its related rows resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: RecipeId,
    pub author: User,
    pub title: String,
    pub image: Option<RecipeImage>,
    pub description: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub tags: Vec<Tag>,
    /// Cooking time in minutes.
    pub time: i32,
    pub pub_date: DateTime<Utc>,
}

/// Validated input for creating or replacing a recipe.
///
/// ## Invariants
/// - at least one ingredient, no ingredient id repeated
/// - tags are unique by slug, first occurrence wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    title: String,
    image: Option<RecipeImage>,
    description: String,
    time: i32,
    ingredients: Vec<(IngredientId, Amount)>,
    tags: Vec<TagDraft>,
}

impl RecipeDraft {
    pub fn new(
        title: &str,
        image: Option<RecipeImage>,
        description: &str,
        time: i64,
        ingredients: Vec<(IngredientId, Amount)>,
        tags: Vec<TagDraft>,
    ) -> Result<Self, RecipeValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(RecipeValidationError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(RecipeValidationError::TitleTooLong { max: TITLE_MAX });
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(RecipeValidationError::EmptyDescription);
        }
        let time = i32::try_from(time)
            .ok()
            .filter(|minutes| *minutes >= 1)
            .ok_or(RecipeValidationError::InvalidCookingTime)?;
        if ingredients.is_empty() {
            return Err(RecipeValidationError::NoIngredients);
        }
        let mut seen = HashSet::with_capacity(ingredients.len());
        if let Some((id, _)) = ingredients.iter().find(|(id, _)| !seen.insert(*id)) {
            return Err(RecipeValidationError::DuplicateIngredient { id: *id });
        }
        let mut slugs = HashSet::with_capacity(tags.len());
        let tags = tags
            .into_iter()
            .filter(|tag| slugs.insert(tag.slug().to_owned()))
            .collect();
        Ok(Self {
            title: title.to_owned(),
            image,
            description: description.to_owned(),
            time,
            ingredients,
            tags,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// New image, or `None` to keep the stored one on update.
    pub fn image(&self) -> Option<&RecipeImage> {
        self.image.as_ref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn time(&self) -> i32 {
        self.time
    }

    pub fn ingredients(&self) -> &[(IngredientId, Amount)] {
        &self.ingredients
    }

    pub fn tags(&self) -> &[TagDraft] {
        &self.tags
    }
}

/// Filters for recipe listings. All set filters must hold; `tags` matches
/// recipes carrying any of the listed slugs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author: Option<UserId>,
    pub tags: Vec<String>,
    pub favorited_by: Option<UserId>,
    pub in_cart_of: Option<UserId>,
}

/// A recipe as seen by a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeView {
    pub recipe: Recipe,
    pub author: UserView,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Short recipe representation used by list actions and subscriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub title: String,
    pub image: Option<RecipeImage>,
    pub time: i32,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title.clone(),
            image: recipe.image.clone(),
            time: recipe.time,
        }
    }
}

/// A followed author with a preview of their recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionView {
    pub author: UserView,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: u64,
}
