//! Favourite and shopping cart actions.
//!
//! ```text
//! POST /api/recipes/{id}/favorite-actions
//! DELETE /api/recipes/{id}/favorite-actions
//! POST /api/recipes/{id}/cart-actions
//! DELETE /api/recipes/{id}/cart-actions
//! ```

use actix_web::{HttpResponse, delete, post, web};

use crate::domain::RecipeList;
use crate::inbound::http::ApiResult;
use crate::inbound::http::recipes_dto::ShortRecipeResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::recipe_id_from_path;

async fn add(
    list: RecipeList,
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let recipe = recipe_id_from_path(path.into_inner())?;
    let summary = state.recipe_lists.add_to_list(list, user_id, recipe).await?;
    Ok(HttpResponse::Created().json(ShortRecipeResponse::from(summary)))
}

async fn remove(
    list: RecipeList,
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let recipe = recipe_id_from_path(path.into_inner())?;
    state
        .recipe_lists
        .remove_from_list(list, user_id, recipe)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/favorite-actions",
    params(("id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 201, description = "Added to favourites", body = ShortRecipeResponse),
        (status = 400, description = "Already in favourites", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "addFavorite"
)]
#[post("/recipes/{id}/favorite-actions")]
pub async fn add_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    add(RecipeList::Favorites, state, session, path).await
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/favorite-actions",
    params(("id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 204, description = "Removed from favourites"),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Not in favourites", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "removeFavorite"
)]
#[delete("/recipes/{id}/favorite-actions")]
pub async fn remove_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    remove(RecipeList::Favorites, state, session, path).await
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/cart-actions",
    params(("id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 201, description = "Added to the shopping cart", body = ShortRecipeResponse),
        (status = 400, description = "Already in the shopping cart", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "addToCart"
)]
#[post("/recipes/{id}/cart-actions")]
pub async fn add_to_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    add(RecipeList::ShoppingCart, state, session, path).await
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/cart-actions",
    params(("id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 204, description = "Removed from the shopping cart"),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Not in the shopping cart", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "removeFromCart"
)]
#[delete("/recipes/{id}/cart-actions")]
pub async fn remove_from_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    remove(RecipeList::ShoppingCart, state, session, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::Error;
    use crate::domain::service_test_support::{recipe_id, summary, user_id};
    use crate::inbound::http::test_utils::{TestPorts, login_cookie, test_app};

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(add_favorite)
            .service(remove_favorite)
            .service(add_to_cart)
            .service(remove_from_cart);
    }

    #[rstest]
    #[case("/api/recipes/3/favorite-actions", RecipeList::Favorites)]
    #[case("/api/recipes/3/cart-actions", RecipeList::ShoppingCart)]
    #[actix_web::test]
    async fn add_returns_short_recipe(#[case] uri: &str, #[case] list: RecipeList) {
        let mut ports = TestPorts::default();
        ports
            .recipe_lists
            .expect_add_to_list()
            .with(eq(list), eq(user_id(1)), eq(recipe_id(3)))
            .times(1)
            .returning(|_, _, recipe| Ok(summary(recipe.get())));
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
        let cookie = login_cookie(&app, 1).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(uri)
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["id"], 3);
        assert_eq!(body["time"], 30);
        let keys: Vec<&str> = body
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys.len(), 4, "{keys:?}");
    }

    #[actix_web::test]
    async fn adding_twice_is_a_bad_request() {
        let mut ports = TestPorts::default();
        ports
            .recipe_lists
            .expect_add_to_list()
            .returning(|list, _, _| Err(Error::already_exists(list.already_present_message())));
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
        let cookie = login_cookie(&app, 1).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/recipes/3/favorite-actions")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], "recipe is already in favorites");
    }

    #[rstest]
    #[case("/api/recipes/3/favorite-actions", RecipeList::Favorites)]
    #[case("/api/recipes/3/cart-actions", RecipeList::ShoppingCart)]
    #[actix_web::test]
    async fn remove_answers_no_content(#[case] uri: &str, #[case] list: RecipeList) {
        let mut ports = TestPorts::default();
        ports
            .recipe_lists
            .expect_remove_from_list()
            .with(eq(list), eq(user_id(1)), eq(recipe_id(3)))
            .times(1)
            .returning(|_, _, _| Ok(()));
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
        let cookie = login_cookie(&app, 1).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(uri)
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn list_actions_require_login() {
        let app =
            actix_test::init_service(test_app(TestPorts::default().into_state(), routes)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/recipes/3/cart-actions")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
