//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the wire shape of their domain types but live
//! in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested employee does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The upstream employee store failed or was unreachable.
    #[schema(rename = "upstream_failure")]
    UpstreamFailure,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Employee not found with id: 42")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-to-message map for validation failures.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Employee`].
///
/// Employee record as stored upstream. Only `id` is always present.
#[derive(ToSchema)]
#[schema(as = crate::domain::Employee)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EmployeeSchema {
    /// Upstream-assigned identifier.
    #[schema(example = "4a3a170b-22cd-4ac2-aad1-9bb5b34a1507")]
    id: String,
    /// Display name.
    #[schema(example = "Tiger Nixon")]
    employee_name: Option<String>,
    /// Annual salary.
    #[schema(example = 320_800)]
    employee_salary: Option<u64>,
    /// Age in years.
    #[schema(example = 61)]
    employee_age: Option<u32>,
    /// Job title.
    #[schema(example = "Vice Chair Executive Principal")]
    employee_title: Option<String>,
    /// Contact address assigned by the upstream.
    #[schema(example = "tnixon@company.com")]
    employee_email: Option<String>,
}
