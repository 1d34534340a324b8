//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: all HTTP endpoints from the inbound layer (employees, health)
//! - **Schemas**: domain type wrappers ([`ErrorSchema`], [`ErrorCodeSchema`],
//!   [`EmployeeSchema`]) that provide OpenAPI definitions without coupling
//!   domain types to the utoipa framework
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::employees::CreateEmployeeRequest;
use crate::inbound::http::schemas::{EmployeeSchema, ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee gateway API",
        description = "HTTP facade over the upstream employee store with retrying upstream calls."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::search_employees,
        crate::inbound::http::employees::highest_salary,
        crate::inbound::http::employees::top_ten_highest_earning_employee_names,
        crate::inbound::http::employees::get_employee,
        crate::inbound::http::employees::create_employee,
        crate::inbound::http::employees::delete_employee,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        EmployeeSchema,
        ErrorSchema,
        ErrorCodeSchema,
        CreateEmployeeRequest
    )),
    tags(
        (name = "employees", description = "Employee operations backed by the upstream store"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
