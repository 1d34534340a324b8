//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **employee_store**: reqwest client for the upstream employee service
//!
//! Adapters are thin translators between domain types and wire
//! representations. They contain no retry policy and no business logic.

pub mod employee_store;
