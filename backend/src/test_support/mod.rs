//! Test utilities shared by unit tests (in `src/`) and integration tests (in
//! `tests/`).
//!
//! Compiled for `cfg(test)` and when the `test-support` feature is enabled.

pub mod employees;
pub mod retry;
