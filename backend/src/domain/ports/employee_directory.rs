//! Driving port for employee use-cases.
//!
//! HTTP handlers depend on this trait only, so they can be exercised with a
//! mock while the production implementation talks to the upstream store.

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeDraft, OperationError};

/// Number of names returned by the top earners view.
pub const TOP_EARNERS_LIMIT: usize = 10;

/// Employee operations exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Every employee known upstream, in upstream order.
    async fn all_employees(&self) -> Result<Vec<Employee>, OperationError>;

    /// One employee by identifier.
    async fn employee_by_id(&self, id: &str) -> Result<Employee, OperationError>;

    /// Employees whose name contains `query`, ignoring case.
    async fn search_by_name(&self, query: &str) -> Result<Vec<Employee>, OperationError>;

    /// Highest salary across employees, or zero when none has a salary.
    async fn highest_salary(&self) -> Result<u64, OperationError>;

    /// Names of at most `limit` best-paid employees, highest salary first.
    /// A salaried employee without a name is reported as `None`.
    async fn top_earning_names(
        &self,
        limit: usize,
    ) -> Result<Vec<Option<String>>, OperationError>;

    /// Create an employee and return the upstream record.
    async fn create_employee(&self, draft: EmployeeDraft) -> Result<Employee, OperationError>;

    /// Delete an employee by identifier and return the deleted name.
    async fn delete_by_id(&self, id: &str) -> Result<String, OperationError>;
}
