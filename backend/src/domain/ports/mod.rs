//! Domain ports for the hexagonal boundary.
//!
//! `EmployeeStore` is driven by the domain and implemented by the outbound
//! HTTP adapter; `EmployeeDirectory` is implemented by the domain service and
//! driven by inbound handlers.

mod macros;
pub(crate) use macros::define_port_error;

mod employee_directory;
mod employee_store;

#[cfg(test)]
pub use employee_directory::MockEmployeeDirectory;
pub use employee_directory::{EmployeeDirectory, TOP_EARNERS_LIMIT};
#[cfg(test)]
pub use employee_store::MockEmployeeStore;
pub use employee_store::{EmployeeStore, EmployeeStoreError, Envelope};
