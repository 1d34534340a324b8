//! Shared helper utilities for gateway integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! the in-process fake upstream lives here instead of in the library.

pub mod fake_upstream;
