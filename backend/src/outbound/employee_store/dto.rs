//! DTOs for the upstream employee service wire format.
//!
//! Responses decode into these transport DTOs first and are mapped into
//! domain envelopes in one pass. Request bodies are serialised from the
//! request DTOs below.

use serde::{Deserialize, Serialize};

use crate::domain::ports::Envelope;
use crate::domain::{Employee, EmployeeDraft};

/// Upstream envelope: `{data, status, error}`.
#[derive(Debug, Deserialize)]
pub(super) struct EnvelopeDto<D> {
    pub(super) data: Option<D>,
    #[serde(default)]
    pub(super) status: Option<String>,
    #[serde(default)]
    pub(super) error: Option<String>,
}

impl<D> EnvelopeDto<D> {
    pub(super) fn into_domain<T>(self, map: impl FnOnce(D) -> T) -> Envelope<T> {
        Envelope {
            payload: self.data.map(map),
            status: self.status.unwrap_or_default(),
            error: self.error,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct EmployeeDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) employee_name: Option<String>,
    #[serde(default)]
    pub(super) employee_salary: Option<u64>,
    #[serde(default)]
    pub(super) employee_age: Option<u32>,
    #[serde(default)]
    pub(super) employee_title: Option<String>,
    #[serde(default)]
    pub(super) employee_email: Option<String>,
}

impl EmployeeDto {
    pub(super) fn into_domain(self) -> Employee {
        Employee {
            id: self.id,
            name: self.employee_name,
            salary: self.employee_salary,
            age: self.employee_age,
            title: self.employee_title,
            email: self.employee_email,
        }
    }

    pub(super) fn into_domain_list(employees: Vec<Self>) -> Vec<Employee> {
        employees.into_iter().map(Self::into_domain).collect()
    }
}

/// Body of `POST /`.
#[derive(Debug, Serialize)]
pub(super) struct CreateEmployeeBody<'a> {
    pub(super) name: &'a str,
    pub(super) salary: u64,
    pub(super) age: u32,
    pub(super) title: &'a str,
}

impl<'a> From<&'a EmployeeDraft> for CreateEmployeeBody<'a> {
    fn from(draft: &'a EmployeeDraft) -> Self {
        Self {
            name: draft.name(),
            salary: draft.salary(),
            age: draft.age(),
            title: draft.title(),
        }
    }
}

/// Body of `DELETE /`.
#[derive(Debug, Serialize)]
pub(super) struct DeleteEmployeeBody<'a> {
    pub(super) name: &'a str,
}
