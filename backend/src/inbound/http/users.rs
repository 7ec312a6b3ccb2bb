//! Users API handlers.
//!
//! ```text
//! POST /api/users/ {"email":"ada@example.com","username":"ada",...}
//! GET /api/users/?page=2&limit=6
//! GET /api/users/me/
//! GET /api/users/{id}/
//! POST /api/users/set_password/ {"current_password":"...","new_password":"..."}
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{ChangePasswordRequest, RegisterUserRequest};
use crate::domain::{Email, Error, Password, PersonName, User, UserView, Username, Viewer};
use crate::inbound::http::ApiResult;
use crate::inbound::http::paging::{PageQuery, into_page};
use crate::inbound::http::schemas::{ErrorSchema, UserPageSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, password_policy_error, user_id_from_path,
    user_validation_error,
};

/// Public profile of a user as seen by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    /// Whether the caller follows this user.
    pub is_subscribed: bool,
}

impl From<UserView> for UserResponse {
    fn from(view: UserView) -> Self {
        let UserView {
            user,
            is_subscribed,
        } = view;
        let RegisteredUserResponse {
            email,
            id,
            username,
            first_name,
            last_name,
        } = RegisteredUserResponse::from(user);
        Self {
            email,
            id,
            username,
            first_name,
            last_name,
            is_subscribed,
        }
    }
}

/// Account returned by registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisteredUserResponse {
    pub email: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for RegisteredUserResponse {
    fn from(user: User) -> Self {
        Self {
            email: user.email.into(),
            id: user.id.get(),
            username: user.username.into(),
            first_name: user.first_name.into(),
            last_name: user.last_name.into(),
        }
    }
}

/// Registration payload for `POST /api/users/`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

fn required(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

fn parse_register_request(payload: RegisterRequest) -> Result<RegisterUserRequest, Error> {
    const EMAIL: FieldName = FieldName::new("email");
    const USERNAME: FieldName = FieldName::new("username");
    const FIRST_NAME: FieldName = FieldName::new("first_name");
    const LAST_NAME: FieldName = FieldName::new("last_name");
    const PASSWORD: FieldName = FieldName::new("password");

    let email = Email::new(required(payload.email, EMAIL)?)
        .map_err(|err| user_validation_error(EMAIL, err))?;
    let username = Username::new(required(payload.username, USERNAME)?)
        .map_err(|err| user_validation_error(USERNAME, err))?;
    let first_name = PersonName::new(required(payload.first_name, FIRST_NAME)?)
        .map_err(|err| user_validation_error(FIRST_NAME, err))?;
    let last_name = PersonName::new(required(payload.last_name, LAST_NAME)?)
        .map_err(|err| user_validation_error(LAST_NAME, err))?;
    let password = Password::new(&required(payload.password, PASSWORD)?)
        .map_err(|err| password_policy_error(PASSWORD, err))?;
    Ok(RegisterUserRequest {
        email,
        username,
        first_name,
        last_name,
        password,
    })
}

/// Password change payload for `POST /api/users/set_password/`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SetPasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/users/",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisteredUserResponse),
        (
            status = 400,
            description = "Invalid request or e-mail/username taken",
            body = ErrorSchema
        ),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users/")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = parse_register_request(payload.into_inner())?;
    let user = state.users_command.register(request).await?;
    Ok(HttpResponse::Created().json(RegisteredUserResponse::from(user)))
}

/// List users, newest account last.
#[utoipa::path(
    get,
    path = "/api/users/",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of users", body = UserPageSchema),
        (status = 400, description = "Invalid page", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
#[get("/users/")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
    request: HttpRequest,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Page<UserResponse>>> {
    let page = query.into_inner().to_request()?;
    let viewer = session.viewer()?;
    let listing = state.users.list_users(viewer, page).await?;
    Ok(web::Json(into_page(&request, page, listing, UserResponse::from)))
}

/// Profile of the logged-in user.
#[utoipa::path(
    get,
    path = "/api/users/me/",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me/")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let view = state
        .users
        .get_user(Viewer::Authenticated(user_id), user_id)
        .await?;
    Ok(web::Json(UserResponse::from(view)))
}

/// A single user profile.
#[utoipa::path(
    get,
    path = "/api/users/{id}/",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{id}/")]
pub async fn get_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = user_id_from_path(path.into_inner())?;
    let viewer = session.viewer()?;
    let view = state.users.get_user(viewer, id).await?;
    Ok(web::Json(UserResponse::from(view)))
}

/// Replace the caller's password.
#[utoipa::path(
    post,
    path = "/api/users/set_password/",
    request_body = SetPasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (
            status = 400,
            description = "Invalid request or wrong current password",
            body = ErrorSchema
        ),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "setPassword"
)]
#[post("/users/set_password/")]
pub async fn set_password(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SetPasswordRequest>,
) -> ApiResult<HttpResponse> {
    const CURRENT: FieldName = FieldName::new("current_password");
    const NEW: FieldName = FieldName::new("new_password");

    let user_id = session.require_user_id()?;
    let SetPasswordRequest {
        current_password,
        new_password,
    } = payload.into_inner();
    let current_password = required(current_password, CURRENT)?;
    let new_password = Password::new(&required(new_password, NEW)?)
        .map_err(|err| password_policy_error(NEW, err))?;
    state
        .users_command
        .change_password(ChangePasswordRequest {
            user_id,
            current_password,
            new_password,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
