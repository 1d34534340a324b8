//! Tests for HTTP error mapping.

use super::*;
use crate::domain::{OperationError, UpstreamFailureKind};
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

#[fixture]
fn internal_error_case(expected_trace_id: String) -> Error {
    Error::internal("boom")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"secret": "x"}))
}

#[fixture]
fn invalid_request_case(expected_trace_id: String) -> Error {
    Error::invalid_request("bad")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"name": "Name is required"}))
}

#[rstest]
#[case::invalid_request(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case::not_found(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case::upstream(Error::upstream_failure("down"), StatusCode::INTERNAL_SERVER_ERROR)]
#[case::internal(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[case::not_found(OperationError::not_found("Employee not found with id: 7"), StatusCode::NOT_FOUND)]
#[case::transient(
    OperationError::upstream(UpstreamFailureKind::Transient, "Failed to fetch employees"),
    StatusCode::INTERNAL_SERVER_ERROR
)]
#[case::unreachable(
    OperationError::upstream(UpstreamFailureKind::Unreachable, "Failed to fetch employees"),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn operation_errors_map_to_statuses(#[case] failure: OperationError, #[case] status: StatusCode) {
    let error = Error::from(failure);
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id not valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn error_responses_include_trace_id_and_payloads(
    #[from(internal_error_case)] internal_error: Error,
    #[from(invalid_request_case)] invalid_request: Error,
    expected_trace_id: String,
) {
    let redacted = assert_error_response(
        internal_error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(redacted.code(), ErrorCode::InternalError);
    assert_eq!(redacted.message(), "Internal server error");
    assert!(redacted.details().is_none());

    let payload = assert_error_response(
        invalid_request,
        StatusCode::BAD_REQUEST,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.message(), "bad");
    assert_eq!(payload.details(), Some(&json!({"name": "Name is required"})));
}

#[rstest]
#[actix_web::test]
async fn upstream_failures_keep_their_message() {
    let error = Error::upstream_failure("Failed to fetch employees: failed after 3 attempts");

    let payload = assert_error_response(error, StatusCode::INTERNAL_SERVER_ERROR, None).await;
    assert_eq!(payload.code(), ErrorCode::UpstreamFailure);
    assert_eq!(
        payload.message(),
        "Failed to fetch employees: failed after 3 attempts"
    );
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::not_found("Employee not found with id: 7");

    let payload = assert_error_response(error, StatusCode::NOT_FOUND, None).await;
    assert_eq!(payload.code(), ErrorCode::NotFound);
    assert_eq!(payload.trace_id(), None);
}

#[test]
fn redaction_only_touches_internal_errors() {
    let internal = Error::internal("db password leaked").with_trace_id(TRACE_ID);
    let redacted = redact_if_internal(&internal);
    assert_eq!(redacted.message(), "Internal server error");
    assert_eq!(redacted.trace_id(), Some(TRACE_ID));

    let not_found = Error::not_found("missing");
    assert_eq!(redact_if_internal(&not_found), not_found);
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    use actix_web::error;

    let actix_err = error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.trace_id(), None);
    assert_eq!(err.details(), None);
}
