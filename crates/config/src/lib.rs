//! # xlog-config
//!
//! Configuration discovery and resolution for loggers.
//! This crate depends on `ports` only.
//!
//! Resolution order: env discovery seeds a [`LoggerConfig`], then explicit
//! [`LoggerOption`]s are applied in order. The resulting value answers the
//! two chain-selection questions: JSON or not, color or not.

/// Deployment environment model.
pub mod environment;
/// Environment variable discovery.
pub mod env;
/// Resolved configuration and its decisions.
pub mod logger_config;

pub use env::{ENV_XLOG_ENV, ENV_XLOG_LEVEL, LoggerEnv};
pub use environment::Environment;
pub use logger_config::{LoggerConfig, LoggerOption, StdStream};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
