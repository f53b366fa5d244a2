//! Logger front-end over a handler chain.

use serde_json::Value;
use std::panic::Location;
use std::sync::Arc;
use xlog_ports::{LogContext, LogHandler, LogLevel, LogRecord, Logger, attrs_from_args};
use xlog_shared::Result;

/// Logger that turns calls into records and hands them to a handler chain.
///
/// Disabled levels are rejected before a record is built.
#[derive(Clone)]
pub struct HandlerLogger {
    handler: Arc<dyn LogHandler>,
}

impl HandlerLogger {
    /// Wrap a handler chain.
    #[must_use]
    pub fn new(handler: Arc<dyn LogHandler>) -> Self {
        Self { handler }
    }
}

impl Logger for HandlerLogger {
    fn enabled(&self, level: LogLevel) -> bool {
        self.handler.enabled(level)
    }

    #[track_caller]
    fn log(
        &self,
        ctx: Option<&LogContext>,
        level: LogLevel,
        message: &str,
        args: &[Value],
    ) -> Result<()> {
        if !self.handler.enabled(level) {
            return Ok(());
        }
        let mut record = LogRecord::new(level, message).with_source(Location::caller().into());
        record.add_args(args);
        self.handler.handle(ctx, &record)
    }

    fn with(&self, args: &[Value]) -> Box<dyn Logger> {
        if args.is_empty() {
            return Box::new(self.clone());
        }
        Box::new(Self::new(self.handler.with_attrs(attrs_from_args(args))))
    }

    fn with_group(&self, name: &str) -> Box<dyn Logger> {
        if name.is_empty() {
            return Box::new(self.clone());
        }
        Box::new(Self::new(self.handler.with_group(name)))
    }

    fn handler(&self) -> Option<Arc<dyn LogHandler>> {
        Some(Arc::clone(&self.handler))
    }
}
