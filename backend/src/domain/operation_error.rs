//! Failure taxonomy returned by employee operations.
//!
//! Callers see two outcomes: the employee is missing, or the upstream store
//! let us down. The upstream case keeps its underlying kind so logs and tests
//! can tell rate limiting from an unreachable host, while the HTTP adapter maps
//! every kind to the same status.

use thiserror::Error;

use super::Error;

/// Why an upstream call ended in failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamFailureKind {
    /// Rate limiting or 5xx responses persisted across the attempt budget.
    Transient,
    /// The upstream rejected the call or violated its response contract.
    Permanent,
    /// Connection failures or timeouts persisted across the attempt budget.
    Unreachable,
}

/// Error returned by employee operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// The upstream confirmed that the employee does not exist.
    #[error("{message}")]
    NotFound {
        /// Human-readable description naming the missing identifier.
        message: String,
    },
    /// The upstream failed, was unreachable, or returned an invalid success.
    #[error("{message}")]
    Upstream {
        /// Underlying failure kind.
        kind: UpstreamFailureKind,
        /// Human-readable description of the failed operation.
        message: String,
    },
}

impl OperationError {
    /// Construct [`OperationError::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Construct [`OperationError::Upstream`].
    pub fn upstream(kind: UpstreamFailureKind, message: impl Into<String>) -> Self {
        Self::Upstream {
            kind,
            message: message.into(),
        }
    }
}

impl From<OperationError> for Error {
    fn from(value: OperationError) -> Self {
        match value {
            OperationError::NotFound { message } => Self::not_found(message),
            OperationError::Upstream { message, .. } => Self::upstream_failure(message),
        }
    }
}
