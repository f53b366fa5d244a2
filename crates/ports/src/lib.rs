//! # xlog-ports
//!
//! Port traits and record types for the xlog handler pipeline.
//!
//! This crate defines the contracts between the logging front-end, the
//! handler chain and the output sinks. It depends only on `shared`.

pub mod context;
pub mod handler;
pub mod level;
pub mod logger;
pub mod record;
pub mod sink;

pub use context::*;
pub use handler::*;
pub use level::*;
pub use logger::*;
pub use record::*;
pub use sink::*;

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
