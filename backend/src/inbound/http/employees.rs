//! Employee API handlers.
//!
//! ```text
//! GET    /api/v1/employee
//! GET    /api/v1/employee/search/{searchString}
//! GET    /api/v1/employee/highestSalary
//! GET    /api/v1/employee/topTenHighestEarningEmployeeNames
//! GET    /api/v1/employee/{id}
//! POST   /api/v1/employee {"name":"Jane Roe","salary":75000,"age":30,"title":"Engineer"}
//! DELETE /api/v1/employee/{id}
//! ```
//!
//! Fixed paths are registered before `/{id}` so they are never captured as
//! identifiers.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::ports::TOP_EARNERS_LIMIT;
use crate::domain::{Employee, EmployeeDraft, EmployeeDraftError, EmployeeDraftInput, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{EmployeeSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Creation request body for `POST /api/v1/employee`.
///
/// Every field is optional on the wire so missing values are reported as
/// validation failures rather than decode failures.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateEmployeeRequest {
    #[schema(example = "Jane Roe")]
    pub name: Option<String>,
    #[schema(example = 75_000)]
    pub salary: Option<i64>,
    #[schema(example = 30)]
    pub age: Option<i64>,
    #[schema(example = "Software Engineer")]
    pub title: Option<String>,
}

impl From<CreateEmployeeRequest> for EmployeeDraftInput {
    fn from(value: CreateEmployeeRequest) -> Self {
        Self {
            name: value.name,
            salary: value.salary,
            age: value.age,
            title: value.title,
        }
    }
}

fn map_draft_error(err: EmployeeDraftError) -> Error {
    let details: Map<String, Value> = err
        .violations()
        .iter()
        .map(|violation| {
            (
                violation.field.to_owned(),
                Value::String(violation.message.to_owned()),
            )
        })
        .collect();
    warn!(error = %err, "rejected employee payload");
    Error::invalid_request("Invalid employee payload").with_details(Value::Object(details))
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!(error = %err, "malformed JSON body");
        Error::invalid_request(format!("Malformed JSON body: {err}")).into()
    })
}

/// Register the employee routes under `/api/v1/employee`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use employee_gateway::inbound::http::employees;
///
/// let app = App::new().configure(employees::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/employee")
            .app_data(json_config())
            .service(list_employees)
            .service(create_employee)
            .service(search_employees)
            .service(highest_salary)
            .service(top_ten_highest_earning_employee_names)
            .service(get_employee)
            .service(delete_employee),
    );
}

/// List every employee.
#[utoipa::path(
    get,
    path = "/api/v1/employee",
    responses(
        (status = 200, description = "Employees", body = [EmployeeSchema]),
        (status = 500, description = "Upstream failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getAllEmployees"
)]
#[get("")]
pub async fn list_employees(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Employee>>> {
    let employees = state.employees.all_employees().await?;
    Ok(web::Json(employees))
}

/// Employees whose name contains the search string, ignoring case.
#[utoipa::path(
    get,
    path = "/api/v1/employee/search/{searchString}",
    params(("searchString" = String, Path, description = "Name fragment")),
    responses(
        (status = 200, description = "Matching employees", body = [EmployeeSchema]),
        (status = 500, description = "Upstream failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getEmployeesByNameSearch"
)]
#[get("/search/{searchString}")]
pub async fn search_employees(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Employee>>> {
    let query = path.into_inner();
    let employees = state.employees.search_by_name(&query).await?;
    Ok(web::Json(employees))
}

/// Highest salary across employees, zero when none has one.
#[utoipa::path(
    get,
    path = "/api/v1/employee/highestSalary",
    responses(
        (status = 200, description = "Highest salary", body = u64),
        (status = 500, description = "Upstream failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getHighestSalaryOfEmployees"
)]
#[get("/highestSalary")]
pub async fn highest_salary(state: web::Data<HttpState>) -> ApiResult<web::Json<u64>> {
    let salary = state.employees.highest_salary().await?;
    Ok(web::Json(salary))
}

/// Names of the ten best-paid employees, highest salary first. A salaried
/// employee without a name appears as `null`.
#[utoipa::path(
    get,
    path = "/api/v1/employee/topTenHighestEarningEmployeeNames",
    responses(
        (status = 200, description = "Employee names; null for an unnamed salaried employee", body = [String]),
        (status = 500, description = "Upstream failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getTopTenHighestEarningEmployeeNames"
)]
#[get("/topTenHighestEarningEmployeeNames")]
pub async fn top_ten_highest_earning_employee_names(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Option<String>>>> {
    let names = state.employees.top_earning_names(TOP_EARNERS_LIMIT).await?;
    Ok(web::Json(names))
}

/// Fetch one employee.
#[utoipa::path(
    get,
    path = "/api/v1/employee/{id}",
    params(("id" = String, Path, description = "Upstream employee identifier")),
    responses(
        (status = 200, description = "Employee", body = EmployeeSchema),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 500, description = "Upstream failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getEmployeeById"
)]
#[get("/{id}")]
pub async fn get_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Employee>> {
    let id = path.into_inner();
    let employee = state.employees.employee_by_id(&id).await?;
    Ok(web::Json(employee))
}

/// Create an employee.
#[utoipa::path(
    post,
    path = "/api/v1/employee",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 200, description = "Created employee", body = EmployeeSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Upstream failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    payload: web::Json<CreateEmployeeRequest>,
) -> ApiResult<web::Json<Employee>> {
    let input = EmployeeDraftInput::from(payload.into_inner());
    let draft = EmployeeDraft::try_from(input).map_err(map_draft_error)?;
    let employee = state.employees.create_employee(draft).await?;
    Ok(web::Json(employee))
}

/// Delete an employee and return the deleted name as plain text.
#[utoipa::path(
    delete,
    path = "/api/v1/employee/{id}",
    params(("id" = String, Path, description = "Upstream employee identifier")),
    responses(
        (status = 200, description = "Deleted employee name", body = String, content_type = "text/plain"),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 500, description = "Upstream failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployeeById"
)]
#[delete("/{id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let name = state.employees.delete_by_id(&id).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(name))
}

#[cfg(test)]
#[path = "employees_tests.rs"]
mod tests;
