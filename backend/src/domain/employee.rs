//! Employee records and the validated creation request.
//!
//! Employees are owned by the upstream store; the gateway only holds copies
//! for the duration of one request. Serialised field names follow the
//! upstream contract (`employee_name`, `employee_salary`, ...) so clients see
//! the same shape the store emits.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Youngest age accepted on creation.
pub const MIN_EMPLOYEE_AGE: i64 = 16;
/// Oldest age accepted on creation.
pub const MAX_EMPLOYEE_AGE: i64 = 75;

/// Employee as reported by the upstream store.
///
/// Only `id` is guaranteed; every other field may be missing in upstream
/// data and is carried as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Opaque upstream-assigned identifier.
    pub id: String,
    /// Display name.
    #[serde(rename = "employee_name")]
    pub name: Option<String>,
    /// Annual salary.
    #[serde(rename = "employee_salary")]
    pub salary: Option<u64>,
    /// Age in years.
    #[serde(rename = "employee_age")]
    pub age: Option<u32>,
    /// Job title.
    #[serde(rename = "employee_title")]
    pub title: Option<String>,
    /// Contact address generated by the upstream on creation.
    #[serde(rename = "employee_email")]
    pub email: Option<String>,
}

/// Unvalidated creation fields as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraftInput {
    /// Requested name.
    pub name: Option<String>,
    /// Requested salary.
    pub salary: Option<i64>,
    /// Requested age.
    pub age: Option<i64>,
    /// Requested title.
    pub title: Option<String>,
}

/// Validated employee creation request.
///
/// ## Invariants
/// - `name` and `title` contain at least one non-whitespace character.
/// - `salary` is greater than zero.
/// - `age` lies within [`MIN_EMPLOYEE_AGE`]..=[`MAX_EMPLOYEE_AGE`].
///
/// # Examples
/// ```
/// use employee_gateway::domain::{EmployeeDraft, EmployeeDraftInput};
///
/// let draft = EmployeeDraft::try_from(EmployeeDraftInput {
///     name: Some("John Doe".into()),
///     salary: Some(75_000),
///     age: Some(30),
///     title: Some("Engineer".into()),
/// })
/// .expect("valid draft");
/// assert_eq!(draft.salary(), 75_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    name: String,
    salary: u64,
    age: u32,
    title: String,
}

impl EmployeeDraft {
    /// Requested name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Requested salary.
    #[must_use]
    pub fn salary(&self) -> u64 {
        self.salary
    }

    /// Requested age.
    #[must_use]
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Requested title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
}

/// One rejected creation field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Client-facing field name.
    pub field: &'static str,
    /// Client-facing message.
    pub message: &'static str,
}

/// Every violation found while validating an [`EmployeeDraftInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraftError {
    violations: Vec<FieldViolation>,
}

impl EmployeeDraftError {
    /// Violations in field declaration order.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

impl fmt::Display for EmployeeDraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self
            .violations
            .iter()
            .map(|violation| format!("{}: {}", violation.field, violation.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "invalid employee payload: {summary}")
    }
}

impl std::error::Error for EmployeeDraftError {}

impl TryFrom<EmployeeDraftInput> for EmployeeDraft {
    type Error = EmployeeDraftError;

    fn try_from(input: EmployeeDraftInput) -> Result<Self, Self::Error> {
        let mut violations = Vec::new();
        let mut check = |field: &'static str, outcome: Result<(), &'static str>| {
            if let Err(message) = outcome {
                violations.push(FieldViolation { field, message });
            }
        };

        let EmployeeDraftInput {
            name,
            salary,
            age,
            title,
        } = input;

        check("name", require_text(name.as_deref(), "Name is required"));
        let salary = validate_salary(salary);
        check("salary", salary.map(drop));
        let age = validate_age(age);
        check("age", age.map(drop));
        check("title", require_text(title.as_deref(), "Title is required"));

        match (name, salary, age, title) {
            (Some(name), Ok(salary), Ok(age), Some(title)) if violations.is_empty() => Ok(Self {
                name,
                salary,
                age,
                title,
            }),
            _ => Err(EmployeeDraftError { violations }),
        }
    }
}

fn require_text(value: Option<&str>, message: &'static str) -> Result<(), &'static str> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(()),
        _ => Err(message),
    }
}

fn validate_salary(salary: Option<i64>) -> Result<u64, &'static str> {
    let salary = salary.ok_or("Salary is required")?;
    u64::try_from(salary)
        .ok()
        .filter(|value| *value > 0)
        .ok_or("Salary must be greater than zero")
}

fn validate_age(age: Option<i64>) -> Result<u32, &'static str> {
    let age = age.ok_or("Age is required")?;
    if age < MIN_EMPLOYEE_AGE {
        return Err("Age must be at least 16");
    }
    if age > MAX_EMPLOYEE_AGE {
        return Err("Age must be at most 75");
    }
    u32::try_from(age).map_err(|_| "Age must be at most 75")
}
