//! Employee use-cases backed by the remote store.
//!
//! Every upstream call goes through the [`RetryOrchestrator`]; failures are
//! translated into [`OperationError`] here and nowhere else.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use super::employee_views::{filter_by_name, highest_salary, top_earning_names};
use super::ports::{EmployeeDirectory, EmployeeStore, EmployeeStoreError, Envelope};
use super::retry::{RetryError, RetryOrchestrator};
use super::{Employee, EmployeeDraft, OperationError, UpstreamFailureKind};

/// Employee service composing the store port with retry policy.
pub struct EmployeeService<S> {
    store: Arc<S>,
    retry: RetryOrchestrator,
}

impl<S> EmployeeService<S>
where
    S: EmployeeStore,
{
    /// Create a new service.
    pub fn new(store: Arc<S>, retry: RetryOrchestrator) -> Self {
        Self { store, retry }
    }

    async fn fetch_all(&self) -> Result<Vec<Employee>, OperationError> {
        info!("fetching all employees");
        let envelope = self
            .retry
            .execute("list_employees", || self.store.list())
            .await
            .map_err(|failure| upstream_failure("Failed to fetch employees", failure))?;

        match envelope.payload {
            Some(employees) => {
                info!(count = employees.len(), "fetched employees");
                Ok(employees)
            }
            None => {
                warn!(
                    status = %envelope.status,
                    upstream_error = ?envelope.error,
                    "upstream returned no employee list"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Employee, OperationError> {
        info!(employee_id = id, "fetching employee");
        match self
            .retry
            .execute("fetch_employee", || self.store.fetch(id))
            .await
        {
            Ok(Envelope {
                payload: Some(employee),
                ..
            }) => Ok(employee),
            Ok(Envelope { status, error, .. }) => {
                warn!(
                    employee_id = id,
                    status = %status,
                    upstream_error = ?error,
                    "upstream returned no employee"
                );
                Err(employee_not_found(id))
            }
            Err(failure) if failure.cause().is_not_found() => {
                warn!(employee_id = id, "employee not found upstream");
                Err(employee_not_found(id))
            }
            Err(failure) => Err(upstream_failure("Failed to fetch employee", failure)),
        }
    }

    async fn create(&self, draft: EmployeeDraft) -> Result<Employee, OperationError> {
        info!(name = draft.name(), "creating employee");
        let draft = &draft;
        let envelope = self
            .retry
            .execute("create_employee", || self.store.create(draft))
            .await
            .map_err(|failure| upstream_failure("Failed to create employee", failure))?;

        let Some(employee) = envelope.payload else {
            error!(
                status = %envelope.status,
                upstream_error = ?envelope.error,
                "upstream create returned no employee"
            );
            return Err(OperationError::upstream(
                UpstreamFailureKind::Permanent,
                "Failed to create employee: upstream returned no data",
            ));
        };
        info!(employee_id = %employee.id, "created employee");
        Ok(employee)
    }

    async fn delete(&self, id: &str) -> Result<String, OperationError> {
        let employee = self.fetch_by_id(id).await?;
        let Some(name) = employee.name else {
            error!(employee_id = id, "employee has no name to delete by");
            return Err(OperationError::upstream(
                UpstreamFailureKind::Permanent,
                format!("Failed to delete employee with id: {id}: upstream record has no name"),
            ));
        };

        info!(employee_id = id, name = %name, "deleting employee");
        let name_ref = name.as_str();
        let envelope = self
            .retry
            .execute("delete_employee", || self.store.delete_by_name(name_ref))
            .await
            .map_err(|failure| upstream_failure("Failed to delete employee", failure))?;

        if envelope.payload == Some(true) {
            info!(employee_id = id, name = %name, "deleted employee");
            Ok(name)
        } else {
            error!(
                employee_id = id,
                payload = ?envelope.payload,
                status = %envelope.status,
                upstream_error = ?envelope.error,
                "upstream did not confirm deletion",
            );
            Err(OperationError::upstream(
                UpstreamFailureKind::Permanent,
                format!("Failed to delete employee with id: {id}"),
            ))
        }
    }
}

#[async_trait]
impl<S> EmployeeDirectory for EmployeeService<S>
where
    S: EmployeeStore + 'static,
{
    async fn all_employees(&self) -> Result<Vec<Employee>, OperationError> {
        self.fetch_all().await
    }

    async fn employee_by_id(&self, id: &str) -> Result<Employee, OperationError> {
        self.fetch_by_id(id).await
    }

    async fn search_by_name(&self, query: &str) -> Result<Vec<Employee>, OperationError> {
        let matches = filter_by_name(self.fetch_all().await?, query);
        info!(query, count = matches.len(), "searched employees by name");
        Ok(matches)
    }

    async fn highest_salary(&self) -> Result<u64, OperationError> {
        Ok(highest_salary(&self.fetch_all().await?))
    }

    async fn top_earning_names(
        &self,
        limit: usize,
    ) -> Result<Vec<Option<String>>, OperationError> {
        Ok(top_earning_names(self.fetch_all().await?, limit))
    }

    async fn create_employee(&self, draft: EmployeeDraft) -> Result<Employee, OperationError> {
        self.create(draft).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<String, OperationError> {
        self.delete(id).await
    }
}

fn employee_not_found(id: &str) -> OperationError {
    OperationError::not_found(format!("Employee not found with id: {id}"))
}

fn upstream_failure(context: &str, failure: RetryError<EmployeeStoreError>) -> OperationError {
    let kind = match &failure {
        RetryError::Rejected { .. } => UpstreamFailureKind::Permanent,
        RetryError::Exhausted { cause, .. } | RetryError::Interrupted { cause, .. }
            if cause.is_unreachable() =>
        {
            UpstreamFailureKind::Unreachable
        }
        RetryError::Exhausted { .. } | RetryError::Interrupted { .. } => {
            UpstreamFailureKind::Transient
        }
    };
    error!(?kind, attempts = failure.attempts(), error = %failure, "{context}");
    OperationError::upstream(kind, format!("{context}: {failure}"))
}

#[cfg(test)]
#[path = "employee_service_tests.rs"]
mod tests;
