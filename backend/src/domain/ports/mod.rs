//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by the persistence adapters.
//! Driving ports (commands and queries) are implemented by the domain
//! services and called by the HTTP handlers.

mod macros;
pub(crate) use macros::define_port_error;

mod catalogue_command;
mod catalogue_query;
mod follow_repository;
mod ingredient_repository;
mod login_service;
mod recipe_command;
mod recipe_list_command;
mod recipe_list_repository;
mod recipe_query;
mod recipe_repository;
mod shopping_list_query;
mod subscription_command;
mod subscription_query;
mod tag_repository;
mod user_command;
mod user_repository;
mod users_query;

pub use catalogue_command::CatalogueCommand;
#[cfg(test)]
pub use catalogue_command::MockCatalogueCommand;
pub use catalogue_query::CatalogueQuery;
#[cfg(test)]
pub use catalogue_query::MockCatalogueQuery;
#[cfg(test)]
pub use follow_repository::MockFollowRepository;
pub use follow_repository::{FollowPersistenceError, FollowRepository};
#[cfg(test)]
pub use ingredient_repository::MockIngredientRepository;
pub use ingredient_repository::{IngredientPersistenceError, IngredientRepository};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use recipe_command::MockRecipeCommand;
pub use recipe_command::RecipeCommand;
#[cfg(test)]
pub use recipe_list_command::MockRecipeListCommand;
pub use recipe_list_command::RecipeListCommand;
#[cfg(test)]
pub use recipe_list_repository::MockRecipeListRepository;
pub use recipe_list_repository::{RecipeListPersistenceError, RecipeListRepository};
#[cfg(test)]
pub use recipe_query::MockRecipeQuery;
pub use recipe_query::{RecipeQuery, RecipeSearch};
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipePersistenceError, RecipeRepository};
#[cfg(test)]
pub use shopping_list_query::MockShoppingListQuery;
pub use shopping_list_query::ShoppingListQuery;
#[cfg(test)]
pub use subscription_command::MockSubscriptionCommand;
pub use subscription_command::SubscriptionCommand;
#[cfg(test)]
pub use subscription_query::MockSubscriptionQuery;
pub use subscription_query::SubscriptionQuery;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
pub use tag_repository::{TagPersistenceError, TagRepository};
#[cfg(test)]
pub use user_command::MockUserCommand;
pub use user_command::{ChangePasswordRequest, RegisterUserRequest, UserCommand};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewUser, StoredCredentials, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
