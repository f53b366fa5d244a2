//! Handler that drops every record.

use std::sync::Arc;
use xlog_ports::{Attr, LogContext, LogHandler, LogLevel, LogRecord};
use xlog_shared::Result;

/// Handler that reports every level disabled and ignores records.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardHandler;

impl LogHandler for DiscardHandler {
    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }

    fn handle(&self, _ctx: Option<&LogContext>, _record: &LogRecord) -> Result<()> {
        Ok(())
    }

    fn with_attrs(&self, _attrs: Vec<Attr>) -> Arc<dyn LogHandler> {
        Arc::new(Self)
    }

    fn with_group(&self, _name: &str) -> Arc<dyn LogHandler> {
        Arc::new(Self)
    }
}
