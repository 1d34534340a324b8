//! Derived views computed over a fetched employee list.

use std::cmp::Reverse;

use super::Employee;

/// Keep employees whose name contains `query`, ignoring case.
///
/// Relative order is preserved. Employees without a name never match; an
/// empty query matches every named employee.
///
/// # Examples
/// ```
/// use employee_gateway::domain::{Employee, employee_views::filter_by_name};
///
/// let named = |id: &str, name: &str| Employee {
///     id: id.into(),
///     name: Some(name.into()),
///     salary: None,
///     age: None,
///     title: None,
///     email: None,
/// };
/// let hits = filter_by_name(vec![named("1", "John Doe"), named("2", "Bob")], "oh");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, "1");
/// ```
#[must_use]
pub fn filter_by_name(employees: Vec<Employee>, query: &str) -> Vec<Employee> {
    let needle = query.to_lowercase();
    employees
        .into_iter()
        .filter(|employee| {
            employee
                .name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Highest salary present, or zero when no employee has one.
#[must_use]
pub fn highest_salary(employees: &[Employee]) -> u64 {
    employees
        .iter()
        .filter_map(|employee| employee.salary)
        .max()
        .unwrap_or(0)
}

/// Names of at most `limit` salaried employees, best paid first.
///
/// Ties keep their original relative order. Employees without a salary are
/// skipped; a salaried employee without a name still takes a slot and is
/// reported as `None`.
#[must_use]
pub fn top_earning_names(employees: Vec<Employee>, limit: usize) -> Vec<Option<String>> {
    let mut salaried: Vec<(u64, Option<String>)> = employees
        .into_iter()
        .filter_map(|employee| employee.salary.map(|salary| (salary, employee.name)))
        .collect();
    // `sort_by_key` is stable, so equal salaries keep upstream order.
    salaried.sort_by_key(|(salary, _)| Reverse(*salary));
    salaried
        .into_iter()
        .take(limit)
        .map(|(_, name)| name)
        .collect()
}
