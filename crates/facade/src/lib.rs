//! # xlog
//!
//! Structured logging with environment-driven encoding, ambient request
//! context and colored terminal output.
//!
//! ```no_run
//! use serde_json::json;
//! use xlog::{ContextKey, LogContext, Logger, LoggerOption};
//!
//! let logger = xlog::new([LoggerOption::ContextKeys(ContextKey::well_known())]);
//! let ctx = LogContext::new().with_request_id("req-123");
//! logger.info_ctx(&ctx, "user signed in", &[json!("user"), json!("ada")])?;
//! # Ok::<(), xlog::ErrorEnvelope>(())
//! ```
//!
//! This crate depends on `config`, `adapters`, `ports` and `shared`.

pub mod chain;
pub mod logger;

pub use chain::{
    HandlerKind, build_handler, build_handler_for, select_handler_kind, select_handler_kind_with,
};
pub use logger::HandlerLogger;
pub use xlog_adapters::{
    ColorHandler, ContextHandler, DiscardHandler, JsonHandler, MemoryLogSink, StderrLogSink,
    StdoutLogSink, TextHandler, WriterLogSink,
};
pub use xlog_config::{
    ENV_XLOG_ENV, ENV_XLOG_LEVEL, Environment, LoggerConfig, LoggerEnv, LoggerOption, StdStream,
};
pub use xlog_ports::{
    Attr, ContextKey, LogContext, LogHandler, LogLevel, LogOutput, LogRecord, LogSink, Logger,
    SourceLocation,
};
pub use xlog_shared::{ErrorEnvelope, Result};

use std::sync::Arc;

/// Build a logger from the process environment with `options` applied in
/// order.
pub fn new(options: impl IntoIterator<Item = LoggerOption>) -> HandlerLogger {
    from_config(&LoggerConfig::from_std_env().with_options(options))
}

/// Build a logger from the process environment alone.
#[must_use]
pub fn from_env() -> HandlerLogger {
    from_config(&LoggerConfig::from_std_env())
}

/// Build a logger from an explicit configuration.
#[must_use]
pub fn from_config(config: &LoggerConfig) -> HandlerLogger {
    HandlerLogger::new(build_handler(config))
}

/// A logger that drops everything.
#[must_use]
pub fn discard() -> HandlerLogger {
    HandlerLogger::new(Arc::new(DiscardHandler))
}

/// Returns the facade crate version.
#[must_use]
pub const fn facade_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
