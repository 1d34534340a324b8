//! Scripted employee store and record builders.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{EmployeeStore, EmployeeStoreError, Envelope};
use crate::domain::{Employee, EmployeeDraft, EmployeeDraftInput};

/// Result of one scripted upstream attempt.
pub type StoreResult<T> = Result<Envelope<T>, EmployeeStoreError>;

/// Upstream call observed by [`ScriptedEmployeeStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// `GET /`.
    List,
    /// `GET /{id}`.
    Fetch(String),
    /// `POST /` with the draft name.
    Create(String),
    /// `DELETE /` with the name.
    Delete(String),
}

/// Employee store replaying scripted outcomes per endpoint.
///
/// Each call pops the next scripted result for its endpoint. Running out of
/// script yields a non-retryable error so a test never loops.
#[derive(Debug, Default)]
pub struct ScriptedEmployeeStore {
    list: Mutex<VecDeque<StoreResult<Vec<Employee>>>>,
    fetch: Mutex<VecDeque<StoreResult<Employee>>>,
    create: Mutex<VecDeque<StoreResult<Employee>>>,
    delete: Mutex<VecDeque<StoreResult<bool>>>,
    calls: Mutex<Vec<StoreCall>>,
}

impl ScriptedEmployeeStore {
    /// Empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue outcomes for `GET /`.
    #[must_use]
    pub fn with_list(self, results: impl IntoIterator<Item = StoreResult<Vec<Employee>>>) -> Self {
        extend(&self.list, results);
        self
    }

    /// Queue outcomes for `GET /{id}`.
    #[must_use]
    pub fn with_fetch(self, results: impl IntoIterator<Item = StoreResult<Employee>>) -> Self {
        extend(&self.fetch, results);
        self
    }

    /// Queue outcomes for `POST /`.
    #[must_use]
    pub fn with_create(self, results: impl IntoIterator<Item = StoreResult<Employee>>) -> Self {
        extend(&self.create, results);
        self
    }

    /// Queue outcomes for `DELETE /`.
    #[must_use]
    pub fn with_delete(self, results: impl IntoIterator<Item = StoreResult<bool>>) -> Self {
        extend(&self.delete, results);
        self
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn record(&self, call: StoreCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

fn extend<T>(queue: &Mutex<VecDeque<T>>, results: impl IntoIterator<Item = T>) {
    queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .extend(results);
}

fn next<T>(queue: &Mutex<VecDeque<StoreResult<T>>>, endpoint: &str) -> StoreResult<T> {
    queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front()
        .unwrap_or_else(|| {
            Err(EmployeeStoreError::invalid_request(format!(
                "no scripted response left for {endpoint}"
            )))
        })
}

#[async_trait]
impl EmployeeStore for ScriptedEmployeeStore {
    async fn list(&self) -> StoreResult<Vec<Employee>> {
        self.record(StoreCall::List);
        next(&self.list, "GET /")
    }

    async fn fetch(&self, id: &str) -> StoreResult<Employee> {
        self.record(StoreCall::Fetch(id.to_owned()));
        next(&self.fetch, "GET /{id}")
    }

    async fn create(&self, draft: &EmployeeDraft) -> StoreResult<Employee> {
        self.record(StoreCall::Create(draft.name().to_owned()));
        next(&self.create, "POST /")
    }

    async fn delete_by_name(&self, name: &str) -> StoreResult<bool> {
        self.record(StoreCall::Delete(name.to_owned()));
        next(&self.delete, "DELETE /")
    }
}

/// Employee with a name and optional salary; other fields stay empty.
pub fn employee(id: &str, name: &str, salary: Option<u64>) -> Employee {
    Employee {
        id: id.to_owned(),
        name: Some(name.to_owned()),
        salary,
        age: None,
        title: None,
        email: None,
    }
}

/// Fully populated employee as the upstream returns it after creation.
pub fn created_employee(id: &str, draft: &EmployeeDraft) -> Employee {
    Employee {
        id: id.to_owned(),
        name: Some(draft.name().to_owned()),
        salary: Some(draft.salary()),
        age: Some(draft.age()),
        title: Some(draft.title().to_owned()),
        email: Some(format!("{}@company.com", draft.name().to_lowercase().replace(' ', "."))),
    }
}

/// Valid creation draft used across tests.
///
/// # Panics
///
/// Panics if the constant sample data stops validating.
pub fn sample_draft(name: &str) -> EmployeeDraft {
    let input = EmployeeDraftInput {
        name: Some(name.to_owned()),
        salary: Some(75_000),
        age: Some(30),
        title: Some("Software Engineer".to_owned()),
    };
    match EmployeeDraft::try_from(input) {
        Ok(draft) => draft,
        Err(error) => panic!("sample draft must validate: {error}"),
    }
}
