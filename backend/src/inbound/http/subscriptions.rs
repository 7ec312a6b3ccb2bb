//! Following authors.
//!
//! ```text
//! GET /api/users/{id}/subscriptions/?page=1&limit=6&recipes_limit=3
//! POST /api/users/{id}/subscribe/?recipes_limit=3
//! DELETE /api/users/{id}/subscribe/
//! ```
//!
//! The subscriptions listing always describes the logged-in user's follows;
//! the `{id}` segment only has to be a well-formed identifier.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::SubscriptionView;
use crate::inbound::http::ApiResult;
use crate::inbound::http::paging::{PageQuery, into_page};
use crate::inbound::http::recipes_dto::ShortRecipeResponse;
use crate::inbound::http::schemas::{ErrorSchema, SubscriptionPageSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserResponse;
use crate::inbound::http::validation::user_id_from_path;

/// A followed author with a preview of their recipes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub author: UserResponse,
    pub recipes: Vec<ShortRecipeResponse>,
    pub recipes_count: u64,
}

impl From<SubscriptionView> for SubscriptionResponse {
    fn from(view: SubscriptionView) -> Self {
        Self {
            author: UserResponse::from(view.author),
            recipes: view
                .recipes
                .into_iter()
                .map(ShortRecipeResponse::from)
                .collect(),
            recipes_count: view.recipes_count,
        }
    }
}

/// Query parameters of the subscriptions listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubscriptionsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Maximum number of recipes previewed per author.
    pub recipes_limit: Option<u32>,
}

/// Preview size for a single subscribe call.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipesLimitQuery {
    pub recipes_limit: Option<u32>,
}

/// Authors followed by the logged-in user.
#[utoipa::path(
    get,
    path = "/api/users/{id}/subscriptions/",
    params(("id" = i64, Path, description = "Any valid user identifier"), SubscriptionsQuery),
    responses(
        (status = 200, description = "Followed authors", body = SubscriptionPageSchema),
        (status = 400, description = "Invalid page", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["subscriptions"],
    operation_id = "listSubscriptions"
)]
#[get("/users/{id}/subscriptions/")]
pub async fn list_subscriptions(
    state: web::Data<HttpState>,
    session: SessionContext,
    request: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<SubscriptionsQuery>,
) -> ApiResult<web::Json<Page<SubscriptionResponse>>> {
    let user_id = session.require_user_id()?;
    user_id_from_path(path.into_inner())?;
    let SubscriptionsQuery {
        page,
        limit,
        recipes_limit,
    } = query.into_inner();
    let page = PageQuery { page, limit }.to_request()?;
    let listing = state
        .subscriptions_query
        .list_subscriptions(user_id, page, recipes_limit)
        .await?;
    Ok(web::Json(into_page(
        &request,
        page,
        listing,
        SubscriptionResponse::from,
    )))
}

/// Follow an author.
#[utoipa::path(
    post,
    path = "/api/users/{id}/subscribe/",
    params(("id" = i64, Path, description = "Author identifier"), RecipesLimitQuery),
    responses(
        (status = 201, description = "Now following", body = SubscriptionResponse),
        (status = 400, description = "Self-follow or already subscribed", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Author not found", body = ErrorSchema)
    ),
    tags = ["subscriptions"],
    operation_id = "subscribe"
)]
#[post("/users/{id}/subscribe/")]
pub async fn subscribe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    query: web::Query<RecipesLimitQuery>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let author = user_id_from_path(path.into_inner())?;
    let view = state
        .subscriptions
        .subscribe(user_id, author, query.into_inner().recipes_limit)
        .await?;
    Ok(HttpResponse::Created().json(SubscriptionResponse::from(view)))
}

/// Stop following an author.
#[utoipa::path(
    delete,
    path = "/api/users/{id}/subscribe/",
    params(("id" = i64, Path, description = "Author identifier")),
    responses(
        (status = 204, description = "No longer following"),
        (status = 400, description = "Not subscribed", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Author not found", body = ErrorSchema)
    ),
    tags = ["subscriptions"],
    operation_id = "unsubscribe"
)]
#[delete("/users/{id}/subscribe/")]
pub async fn unsubscribe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let author = user_id_from_path(path.into_inner())?;
    state.subscriptions.unsubscribe(user_id, author).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "subscriptions_tests.rs"]
mod tests;
