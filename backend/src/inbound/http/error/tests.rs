//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::already_exists("dup"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn error_payload(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace-id is ASCII").to_owned());
    assert_eq!(header.as_deref(), expected_trace_id);

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(expected_trace_id: String) {
    let error = Error::internal("connection string leaked")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let redacted = error_payload(
        error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(redacted.code(), ErrorCode::InternalError);
    assert_eq!(redacted.message(), "Internal server error");
    assert_eq!(redacted.trace_id(), Some(expected_trace_id.as_str()));
    assert!(redacted.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details(expected_trace_id: String) {
    let error = Error::invalid_request("bad")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"field": "title", "code": "empty"}));

    let payload = error_payload(
        error,
        StatusCode::BAD_REQUEST,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(payload.message(), "bad");
    assert_eq!(
        payload.details(),
        Some(&json!({"field": "title", "code": "empty"}))
    );
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::not_found("recipe 3 not found");
    let payload = error_payload(error, StatusCode::NOT_FOUND, None).await;
    assert_eq!(payload.code(), ErrorCode::NotFound);
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

mod extractors {
    use super::*;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use serde_json::Value;

    async fn echo(path: web::Path<i64>, body: web::Json<Value>) -> HttpResponse {
        HttpResponse::Ok().json(json!({ "id": path.into_inner(), "body": body.into_inner() }))
    }

    async fn call(uri: &str, body: &'static str, content_type: &str) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new().service(
                web::scope("/api")
                    .configure(|cfg| configure_extractors(cfg, 64))
                    .route("/things/{id}/", web::post().to(echo)),
            ),
        )
        .await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(uri)
                .insert_header(("content-type", content_type))
                .set_payload(body)
                .to_request(),
        )
        .await;
        let status = response.status();
        (status, actix_test::read_body_json(response).await)
    }

    #[rstest]
    #[actix_web::test]
    async fn well_formed_requests_pass_through() {
        let (status, body) = call("/api/things/4/", r#"{"a":1}"#, "application/json").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 4);
    }

    #[rstest]
    #[case(r#"{"a":"#, "malformed_json")]
    #[case(
        r#"{"padding":"xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx"}"#,
        "body_too_large"
    )]
    #[actix_web::test]
    async fn bad_bodies_use_the_error_envelope(#[case] body: &'static str, #[case] code: &str) {
        let (status, payload) = call("/api/things/4/", body, "application/json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["code"], "invalid_request");
        assert_eq!(payload["details"]["code"], code);
    }

    #[rstest]
    #[actix_web::test]
    async fn wrong_content_type_is_rejected() {
        let (status, payload) = call("/api/things/4/", r#"{"a":1}"#, "text/plain").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["details"]["code"], "content_type");
    }

    #[rstest]
    #[actix_web::test]
    async fn non_numeric_ids_are_not_found() {
        let (status, payload) = call("/api/things/abc/", r#"{"a":1}"#, "application/json").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(payload["code"], "not_found");
    }
}
