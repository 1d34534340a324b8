//! Domain primitives and use-cases.
//!
//! Purpose: define the employee record, creation drafts, retry policy and
//! the service that composes them over the remote store port. Nothing in
//! here knows about HTTP status lines or actix.
//!
//! Public surface:
//! - Employee (alias to `employee::Employee`) — record as the upstream stores it.
//! - EmployeeDraft (alias to `employee::EmployeeDraft`) — validated creation input.
//! - EmployeeService (alias to `employee_service::EmployeeService`) — use-cases.
//! - Error (alias to `error::Error`) — facade error response payload.
//! - OperationError (alias to `operation_error::OperationError`) — use-case failure.
//! - TraceId (alias to `trace_id::TraceId`) — request correlation identifier.

pub mod employee;
pub mod employee_service;
pub mod employee_views;
pub mod error;
pub mod operation_error;
pub mod ports;
pub mod retry;
pub mod trace_id;

pub use self::employee::{
    Employee, EmployeeDraft, EmployeeDraftError, EmployeeDraftInput, FieldViolation,
    MAX_EMPLOYEE_AGE, MIN_EMPLOYEE_AGE,
};
pub use self::employee_service::EmployeeService;
pub use self::error::{Error, ErrorCode};
pub use self::operation_error::{OperationError, UpstreamFailureKind};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
