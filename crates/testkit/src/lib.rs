//! # xlog-testkit
//!
//! Test doubles for the xlog ports: the capture logger and sink failure
//! fixtures. This crate depends on `ports` and `shared`.

pub mod capture;
pub mod errors;

pub use capture::{CaptureLogger, LogEntry};

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
