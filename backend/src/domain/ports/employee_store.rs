//! Driven port for the remote employee store.
//!
//! Each method performs exactly one upstream attempt and reports the raw
//! outcome. Retry policy and business interpretation stay in the domain.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::retry::RetryClassification;
use crate::domain::{Employee, EmployeeDraft};

/// Successfully decoded upstream envelope.
///
/// Failed calls never produce an envelope; they surface as
/// [`EmployeeStoreError`]. A missing payload therefore always means the
/// upstream answered successfully without data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope<T> {
    /// Response payload, absent when the upstream sent `null`.
    pub payload: Option<T>,
    /// Status text reported by the upstream.
    pub status: String,
    /// Error text the upstream attached to an otherwise successful response.
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Envelope carrying `payload`.
    pub fn with_payload(payload: T) -> Self {
        Self {
            payload: Some(payload),
            status: "Successfully processed request.".to_owned(),
            error: None,
        }
    }

    /// Envelope without payload.
    pub fn empty(status: impl Into<String>) -> Self {
        Self {
            payload: None,
            status: status.into(),
            error: None,
        }
    }
}

define_port_error! {
    /// Failures reported by one upstream attempt.
    pub enum EmployeeStoreError {
        /// The upstream answered with a non-success status.
        Status { status: u16, body: String } =>
            "upstream responded with status {status}: {body}",
        /// The connection failed before a response arrived.
        Transport { message: String } =>
            "upstream transport failed: {message}",
        /// The attempt exceeded its connect or read timeout.
        Timeout { message: String } =>
            "upstream timed out: {message}",
        /// A success response could not be decoded.
        Decode { message: String } =>
            "upstream response decode failed: {message}",
        /// The adapter could not build the request.
        InvalidRequest { message: String } =>
            "upstream request invalid: {message}",
    }
}

impl EmployeeStoreError {
    /// HTTP status reported by the upstream, when one was received.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Return whether the upstream answered 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Return whether the attempt never reached a response.
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}

impl RetryClassification for EmployeeStoreError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::Transport { .. } | Self::Timeout { .. } => true,
            Self::Decode { .. } | Self::InvalidRequest { .. } => false,
        }
    }
}

/// Port for one-shot calls against the upstream employee store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// `GET /`: every employee.
    async fn list(&self) -> Result<Envelope<Vec<Employee>>, EmployeeStoreError>;

    /// `GET /{id}`: one employee.
    async fn fetch(&self, id: &str) -> Result<Envelope<Employee>, EmployeeStoreError>;

    /// `POST /`: create an employee from validated fields.
    async fn create(&self, draft: &EmployeeDraft)
    -> Result<Envelope<Employee>, EmployeeStoreError>;

    /// `DELETE /` with `{name}`: remove employees by name.
    async fn delete_by_name(&self, name: &str) -> Result<Envelope<bool>, EmployeeStoreError>;
}
