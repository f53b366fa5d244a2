//! # xlog-shared
//!
//! Shared result types and error handling for the xlog workspace.
//!
//! This crate provides foundational types that are used across all other crates:
//!
//! - `ErrorEnvelope`, the single error type handlers and sinks return
//! - The `Result` alias built on it
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Serde-compatible** - All public types support serialization

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod result;

pub use errors::{ErrorClass, ErrorCode, ErrorEnvelope, ErrorMetadata};
pub use result::Result;

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
