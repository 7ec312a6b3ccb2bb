//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture provides a valid UUID")
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn new_substitutes_blank_messages() {
    let err = Error::new(ErrorCode::NotFound, "");
    assert_eq!(err.message(), "not found");
}

#[rstest]
fn try_with_trace_id_rejects_blank_values() {
    let result = Error::internal("boom").try_with_trace_id(" ");
    assert_eq!(result, Err(ErrorValidationError::EmptyTraceId));
}

#[rstest]
fn already_exists_is_an_invalid_request_with_code() {
    let err = Error::already_exists("recipe is already in favorites");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.details(), Some(&json!({ "code": "already_exists" })));
}

#[rstest]
fn new_has_no_trace_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(trace_id: TraceId) {
    let error = TraceId::scope(trace_id, async { Error::forbidden("nope") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_camel_case_payload() {
    let err = Error::invalid_request("bad")
        .with_trace_id("abc")
        .with_details(json!({ "field": "title" }));

    let value = serde_json::to_value(&err).expect("serialisable error");
    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "bad",
            "traceId": "abc",
            "details": { "field": "title" },
        })
    );
}

#[rstest]
#[tokio::test]
async fn deserialising_ignores_ambient_trace(trace_id: TraceId) {
    let payload = json!({ "code": "not_found", "message": "missing" });
    let error: Error = TraceId::scope(trace_id, async move {
        serde_json::from_value(payload).expect("valid payload")
    })
    .await;

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert!(error.trace_id().is_none());
}

#[rstest]
fn deserialising_rejects_blank_message() {
    let payload = json!({ "code": "not_found", "message": "" });
    assert!(serde_json::from_value::<Error>(payload).is_err());
}
