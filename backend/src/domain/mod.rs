//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed entities shared by the HTTP and
//! persistence adapters, the ports those adapters plug into, and the
//! services implementing the use cases on top of the ports.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable identifier.
//! - User, Recipe, Tag, Ingredient and their validated drafts.
//! - RecipeView, UserView, SubscriptionView: read models built per viewer.
//! - ShoppingList: aggregated ingredient totals for a cart.

pub mod auth;
pub mod error;
pub mod image;
pub mod ingredient;
pub mod listing;
pub mod ports;
pub mod recipe;
pub mod recipe_list;
pub mod shopping_list;
pub mod tag;
pub mod trace_id;
pub mod user;
pub mod viewer;

mod catalogue_service;
mod recipe_list_service;
mod recipe_service;
mod subscription_service;
mod user_service;

#[cfg(test)]
pub(crate) mod service_test_support;

pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, Password, PasswordHash,
    PasswordHashError,
};
pub use self::catalogue_service::CatalogueService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::image::{IMAGE_MAX_BYTES, ImageValidationError, RecipeImage};
pub use self::ingredient::{
    Ingredient, IngredientDraft, IngredientFilter, IngredientId, IngredientValidationError,
};
pub use self::listing::Listing;
pub use self::recipe::{
    Amount, Recipe, RecipeDraft, RecipeFilter, RecipeId, RecipeIngredient, RecipeSummary,
    RecipeValidationError, RecipeView, SubscriptionView,
};
pub use self::recipe_list::RecipeList;
pub use self::recipe_list_service::RecipeListService;
pub use self::recipe_service::RecipeService;
pub use self::shopping_list::{
    SHOPPING_LIST_HEADER, ShoppingList, ShoppingListLine, ShoppingListRow,
};
pub use self::subscription_service::SubscriptionService;
pub use self::tag::{Tag, TagDraft, TagId, TagValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, PersonName, User, UserId, UserValidationError, UserView, Username};
pub use self::user_service::UserService;
pub use self::viewer::Viewer;
