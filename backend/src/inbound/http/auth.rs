//! Session login and logout.
//!
//! ```text
//! POST /api/auth/login/ {"email":"ada@example.com","password":"..."}
//! POST /api/auth/logout/
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::login_validation_error;

/// Login request body.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Authenticate with e-mail and password and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/login/",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Login success",
            headers(("Set-Cookie" = String, description = "Session cookie"))
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login/")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(user_id)?;
    info!(%user_id, "user logged in");
    Ok(HttpResponse::Ok().finish())
}

/// Drop the session. Succeeds without a session too.
#[utoipa::path(
    post,
    path = "/api/auth/logout/",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout/")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::Error;
    use crate::domain::service_test_support::user_id;
    use crate::inbound::http::test_utils::{TestPorts, session_cookie, test_app};

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(login).service(logout);
    }

    #[actix_web::test]
    async fn login_sets_session_cookie() {
        let mut ports = TestPorts::default();
        ports
            .login
            .expect_authenticate()
            .withf(|credentials| credentials.email() == "ada@example.com")
            .times(1)
            .returning(|_| Ok(user_id(9)));
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/login/")
                .set_json(json!({"email": "ada@example.com", "password": "s3cret-pass"}))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!session_cookie(&response).value().is_empty());
    }

    #[rstest]
    #[case("  ", "pw", "email", "empty_email")]
    #[case("ada@example.com", "", "password", "empty_password")]
    #[actix_web::test]
    async fn login_rejects_blank_fields(
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let app =
            actix_test::init_service(test_app(TestPorts::default().into_state(), routes)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/login/")
                .set_json(json!({"email": email, "password": password}))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], field);
        assert_eq!(body["details"]["code"], code);
    }

    #[actix_web::test]
    async fn login_rejects_wrong_credentials_with_unauthorised_status() {
        let mut ports = TestPorts::default();
        ports
            .login
            .expect_authenticate()
            .returning(|_| Err(Error::unauthorized("invalid credentials")));
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/login/")
                .set_json(json!({"email": "ada@example.com", "password": "wrong-pass"}))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], "invalid credentials");
    }

    #[actix_web::test]
    async fn logout_succeeds_without_session() {
        let app =
            actix_test::init_service(test_app(TestPorts::default().into_state(), routes)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/logout/")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
