//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CatalogueCommand, CatalogueQuery, LoginService, RecipeCommand, RecipeListCommand,
    RecipeQuery, ShoppingListQuery, SubscriptionCommand, SubscriptionQuery, UserCommand,
    UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users_command: Arc<dyn UserCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub subscriptions: Arc<dyn SubscriptionCommand>,
    pub subscriptions_query: Arc<dyn SubscriptionQuery>,
    pub recipes: Arc<dyn RecipeCommand>,
    pub recipes_query: Arc<dyn RecipeQuery>,
    pub recipe_lists: Arc<dyn RecipeListCommand>,
    pub shopping_list: Arc<dyn ShoppingListQuery>,
    pub catalogue: Arc<dyn CatalogueCommand>,
    pub catalogue_query: Arc<dyn CatalogueQuery>,
}
