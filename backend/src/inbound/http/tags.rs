//! Tag catalogue handlers.
//!
//! ```text
//! GET /api/tags/
//! POST /api/tags/ {"name":"Breakfast","color":"#E26C2D","slug":"breakfast"}
//! GET /api/tags/{id}/
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Tag, TagDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{tag_id_from_path, tag_validation_error};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagResponse {
    pub id: i64,
    #[schema(example = "Breakfast")]
    pub name: String,
    #[schema(example = "#E26C2D")]
    pub color: String,
    #[schema(example = "breakfast")]
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id.get(),
            name: tag.name,
            color: tag.color,
            slug: tag.slug,
        }
    }
}

/// Tag fields, used for catalogue creation and inside recipe payloads.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TagRequest {
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl TryFrom<TagRequest> for TagDraft {
    type Error = Error;

    fn try_from(value: TagRequest) -> Result<Self, Self::Error> {
        Self::new(&value.name, &value.color, &value.slug).map_err(tag_validation_error)
    }
}

/// All tags, ordered by name.
#[utoipa::path(
    get,
    path = "/api/tags/",
    responses(
        (status = 200, description = "Tags", body = [TagResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "listTags",
    security([])
)]
#[get("/tags/")]
pub async fn list_tags(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<TagResponse>>> {
    let tags = state.catalogue_query.list_tags().await?;
    Ok(web::Json(tags.into_iter().map(TagResponse::from).collect()))
}

/// Add a tag to the catalogue.
#[utoipa::path(
    post,
    path = "/api/tags/",
    request_body = TagRequest,
    responses(
        (status = 201, description = "Tag created", body = TagResponse),
        (status = 400, description = "Invalid or duplicate tag", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "createTag"
)]
#[post("/tags/")]
pub async fn create_tag(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<TagRequest>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let draft = TagDraft::try_from(payload.into_inner())?;
    let tag = state.catalogue.create_tag(draft).await?;
    Ok(HttpResponse::Created().json(TagResponse::from(tag)))
}

#[utoipa::path(
    get,
    path = "/api/tags/{id}/",
    params(("id" = i64, Path, description = "Tag identifier")),
    responses(
        (status = 200, description = "Tag", body = TagResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "getTag",
    security([])
)]
#[get("/tags/{id}/")]
pub async fn get_tag(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<TagResponse>> {
    let id = tag_id_from_path(path.into_inner())?;
    let tag = state.catalogue_query.get_tag(id).await?;
    Ok(web::Json(TagResponse::from(tag)))
}
