//! Wiring of Diesel repositories into domain services and HTTP state.

use std::sync::Arc;

use actix_web::web;

use foodgram::domain::{
    CatalogueService, RecipeListService, RecipeService, SubscriptionService, UserService,
};
use foodgram::inbound::http::state::HttpState;
use foodgram::outbound::persistence::{
    DbPool, DieselCatalogueRepository, DieselRecipeRepository, DieselUserRepository,
};

/// Build the handler state backed by `pool`.
///
/// Each repository is shared by every service that needs one of its ports.
pub(super) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let catalogue = Arc::new(DieselCatalogueRepository::new(pool.clone()));
    let recipes = Arc::new(DieselRecipeRepository::new(pool.clone()));

    let user_service = Arc::new(UserService::new(users.clone(), users.clone()));
    let subscriptions = Arc::new(SubscriptionService::new(
        users.clone(),
        users.clone(),
        recipes.clone(),
    ));
    let recipe_service = Arc::new(RecipeService::new(
        recipes.clone(),
        recipes.clone(),
        users,
        catalogue.clone(),
    ));
    let recipe_lists = Arc::new(RecipeListService::new(recipes.clone(), recipes));
    let catalogue_service = Arc::new(CatalogueService::new(catalogue.clone(), catalogue));

    web::Data::new(HttpState {
        login: user_service.clone(),
        users_command: user_service.clone(),
        users: user_service,
        subscriptions: subscriptions.clone(),
        subscriptions_query: subscriptions,
        recipes: recipe_service.clone(),
        recipes_query: recipe_service,
        recipe_lists: recipe_lists.clone(),
        shopping_list: recipe_lists,
        catalogue: catalogue_service.clone(),
        catalogue_query: catalogue_service,
    })
}
