//! Recipe handlers.
//!
//! ```text
//! GET /api/recipes/?author=3&tags=lunch&tags=dinner&is_favorited=1&page=2
//! POST /api/recipes/
//! GET /api/recipes/download-cart/
//! GET /api/recipes/{id}/
//! PUT /api/recipes/{id}/
//! DELETE /api/recipes/{id}/
//! ```

use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use pagination::{Page, PAGE_PARAM};
use utoipa::IntoParams;

use crate::domain::ports::RecipeSearch;
use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::paging::{PageQuery, into_page};
use crate::inbound::http::recipes_dto::{RecipeResponse, RecipeWriteRequest, parse_recipe_request};
use crate::inbound::http::schemas::{ErrorSchema, RecipePageSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field, recipe_id_from_path, user_id_from_path,
};

/// Name of the downloaded shopping list file.
pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

/// Listing filters, documented for OpenAPI. The handler reads the raw query
/// string because `tags` may repeat.
#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI parameter generation via utoipa"
)]
pub struct RecipeListQuery {
    page: Option<u32>,
    limit: Option<u32>,
    /// Only recipes by this author.
    author: Option<i64>,
    /// Tag slugs; a recipe matches when it carries any of them.
    tags: Option<Vec<String>>,
    /// `1` or `true` to list the caller's favourites.
    is_favorited: Option<String>,
    /// `1` or `true` to list the caller's shopping cart.
    is_in_shopping_cart: Option<String>,
}

fn parse_flag(field: &'static str, raw: &str) -> Result<bool, Error> {
    match raw {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(invalid_field(
            FieldName::new(field),
            "invalid_flag",
            format!("{field} must be 1, 0, true or false, got {other:?}"),
        )),
    }
}

fn parse_number<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, Error> {
    raw.parse().map_err(|_| {
        invalid_field(
            FieldName::new(field),
            "invalid_number",
            format!("{field} must be a positive integer"),
        )
    })
}

/// Parse the listing query string into filters and a page request.
pub(crate) fn parse_list_query(query: &str) -> Result<(RecipeSearch, PageQuery), Error> {
    let mut search = RecipeSearch::default();
    let mut page = PageQuery::default();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            PAGE_PARAM => page.page = Some(parse_number("page", &value)?),
            "limit" => page.limit = Some(parse_number("limit", &value)?),
            "author" => {
                let raw: i64 = parse_number("author", &value)?;
                let author = user_id_from_path(raw).map_err(|_| {
                    invalid_field(FieldName::new("author"), "invalid_id", "author must be positive")
                })?;
                search.author = Some(author);
            }
            "tags" if !value.is_empty() => search.tags.push(value.into_owned()),
            "is_favorited" => search.only_favorited = parse_flag("is_favorited", &value)?,
            "is_in_shopping_cart" => {
                search.only_in_shopping_cart = parse_flag("is_in_shopping_cart", &value)?;
            }
            _ => {}
        }
    }
    Ok((search, page))
}

/// Recipes newest first, optionally filtered.
#[utoipa::path(
    get,
    path = "/api/recipes/",
    params(RecipeListQuery),
    responses(
        (status = 200, description = "One page of recipes", body = RecipePageSchema),
        (status = 400, description = "Invalid filter or page", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes",
    security([])
)]
#[get("/recipes/")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    session: SessionContext,
    request: HttpRequest,
) -> ApiResult<web::Json<Page<RecipeResponse>>> {
    let (search, page) = parse_list_query(request.query_string())?;
    let page = page.to_request()?;
    let viewer = session.viewer()?;
    let listing = state.recipes_query.list_recipes(viewer, search, page).await?;
    Ok(web::Json(into_page(&request, page, listing, RecipeResponse::from)))
}

/// Publish a recipe as the logged-in user.
#[utoipa::path(
    post,
    path = "/api/recipes/",
    request_body = RecipeWriteRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Invalid or duplicate recipe", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes/")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecipeWriteRequest>,
) -> ApiResult<HttpResponse> {
    let author = session.require_user_id()?;
    let draft = parse_recipe_request(payload.into_inner())?;
    let view = state.recipes.create_recipe(author, draft).await?;
    Ok(HttpResponse::Created().json(RecipeResponse::from(view)))
}

/// Aggregated shopping list for the caller's cart, as a text attachment.
#[utoipa::path(
    get,
    path = "/api/recipes/download-cart/",
    responses(
        (status = 200, description = "Shopping list", content_type = "text/plain", body = String),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "downloadShoppingCart"
)]
#[get("/recipes/download-cart/")]
pub async fn download_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let list = state.shopping_list.shopping_list(user_id).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(SHOPPING_LIST_FILENAME.to_owned())],
        })
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(list.render()))
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/",
    params(("id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe", body = RecipeResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe",
    security([])
)]
#[get("/recipes/{id}/")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let id = recipe_id_from_path(path.into_inner())?;
    let viewer = session.viewer()?;
    let view = state.recipes_query.get_recipe(viewer, id).await?;
    Ok(web::Json(RecipeResponse::from(view)))
}

/// Replace a recipe. Only its author may do so.
#[utoipa::path(
    put,
    path = "/api/recipes/{id}/",
    params(("id" = i64, Path, description = "Recipe identifier")),
    request_body = RecipeWriteRequest,
    responses(
        (status = 200, description = "Recipe replaced", body = RecipeResponse),
        (status = 400, description = "Invalid recipe", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
#[put("/recipes/{id}/")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<RecipeWriteRequest>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let user_id = session.require_user_id()?;
    let id = recipe_id_from_path(path.into_inner())?;
    let draft = parse_recipe_request(payload.into_inner())?;
    let view = state.recipes.update_recipe(user_id, id, draft).await?;
    Ok(web::Json(RecipeResponse::from(view)))
}

/// Delete a recipe. Only its author may do so.
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/",
    params(("id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}/")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let id = recipe_id_from_path(path.into_inner())?;
    state.recipes.delete_recipe(user_id, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
