//! HTTP inbound adapter exposing the REST endpoints under `/api`.

pub mod auth;
pub mod error;
pub mod health;
pub mod ingredients;
pub mod paging;
pub mod recipe_lists;
pub mod recipes;
pub mod recipes_dto;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
pub mod subscriptions;
pub mod tags;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Largest accepted JSON body: a maximal inline image in base64 plus the
/// rest of a recipe payload.
pub const JSON_BODY_LIMIT: usize = 8 * 1024 * 1024;

/// Register every `/api` handler.
///
/// Literal paths (`users/me/`, `recipes/download-cart/`) come before the
/// `{id}` patterns they would otherwise match.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    error::configure_extractors(cfg, JSON_BODY_LIMIT);
    cfg.service(auth::login)
        .service(auth::logout)
        .service(users::register)
        .service(users::list_users)
        .service(users::me)
        .service(users::set_password)
        .service(users::get_user)
        .service(subscriptions::list_subscriptions)
        .service(subscriptions::subscribe)
        .service(subscriptions::unsubscribe)
        .service(recipes::list_recipes)
        .service(recipes::create_recipe)
        .service(recipes::download_cart)
        .service(recipes::get_recipe)
        .service(recipes::update_recipe)
        .service(recipes::delete_recipe)
        .service(recipe_lists::add_favorite)
        .service(recipe_lists::remove_favorite)
        .service(recipe_lists::add_to_cart)
        .service(recipe_lists::remove_from_cart)
        .service(tags::list_tags)
        .service(tags::create_tag)
        .service(tags::get_tag)
        .service(ingredients::list_ingredients)
        .service(ingredients::create_ingredient)
        .service(ingredients::get_ingredient);
}
