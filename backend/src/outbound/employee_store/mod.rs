//! Employee store outbound adapters.
//!
//! This module provides the reqwest implementation of the `EmployeeStore`
//! port against the upstream employee HTTP service.

mod dto;
mod http_store;

pub use http_store::{HttpEmployeeStore, HttpEmployeeStoreConfig};
