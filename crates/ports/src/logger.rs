//! Structured logging front-end contract.

use crate::context::LogContext;
use crate::handler::LogHandler;
use crate::level::LogLevel;
use serde_json::Value;
use std::sync::Arc;
use xlog_shared::Result;

/// Boundary contract for structured logging.
///
/// `args` are alternating keys and values (`&[json!("user"), json!("ada")]`);
/// a `Value::Object` value is logged as an attribute group. Logging methods
/// are `#[track_caller]`, so the call site can be reported when enabled.
pub trait Logger: Send + Sync {
    /// Returns true when records at `level` would be emitted.
    fn enabled(&self, level: LogLevel) -> bool;

    /// Emit a record, optionally with an ambient context.
    #[track_caller]
    fn log(
        &self,
        ctx: Option<&LogContext>,
        level: LogLevel,
        message: &str,
        args: &[Value],
    ) -> Result<()>;

    /// Create a child logger with `args` applied to every record.
    fn with(&self, args: &[Value]) -> Box<dyn Logger>;

    /// Create a child logger whose attributes are qualified by `name`.
    fn with_group(&self, name: &str) -> Box<dyn Logger>;

    /// The handler chain behind this logger, if it has one.
    fn handler(&self) -> Option<Arc<dyn LogHandler>>;

    /// Convenience: debug record.
    #[track_caller]
    fn debug(&self, message: &str, args: &[Value]) -> Result<()> {
        self.log(None, LogLevel::DEBUG, message, args)
    }

    /// Convenience: info record.
    #[track_caller]
    fn info(&self, message: &str, args: &[Value]) -> Result<()> {
        self.log(None, LogLevel::INFO, message, args)
    }

    /// Convenience: warn record.
    #[track_caller]
    fn warn(&self, message: &str, args: &[Value]) -> Result<()> {
        self.log(None, LogLevel::WARN, message, args)
    }

    /// Convenience: error record.
    #[track_caller]
    fn error(&self, message: &str, args: &[Value]) -> Result<()> {
        self.log(None, LogLevel::ERROR, message, args)
    }

    /// Convenience: debug record with context.
    #[track_caller]
    fn debug_ctx(&self, ctx: &LogContext, message: &str, args: &[Value]) -> Result<()> {
        self.log(Some(ctx), LogLevel::DEBUG, message, args)
    }

    /// Convenience: info record with context.
    #[track_caller]
    fn info_ctx(&self, ctx: &LogContext, message: &str, args: &[Value]) -> Result<()> {
        self.log(Some(ctx), LogLevel::INFO, message, args)
    }

    /// Convenience: warn record with context.
    #[track_caller]
    fn warn_ctx(&self, ctx: &LogContext, message: &str, args: &[Value]) -> Result<()> {
        self.log(Some(ctx), LogLevel::WARN, message, args)
    }

    /// Convenience: error record with context.
    #[track_caller]
    fn error_ctx(&self, ctx: &LogContext, message: &str, args: &[Value]) -> Result<()> {
        self.log(Some(ctx), LogLevel::ERROR, message, args)
    }
}
