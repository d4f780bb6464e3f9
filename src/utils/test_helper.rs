//! Helpers for checking the log output of the solvers in unit tests.
//!
//! Only compiled for `cargo test`.
