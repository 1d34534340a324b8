//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::EmployeeDirectory;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub employees: Arc<dyn EmployeeDirectory>,
}

impl HttpState {
    /// Construct state from the employee use-case port.
    pub fn new(employees: Arc<dyn EmployeeDirectory>) -> Self {
        Self { employees }
    }
}
