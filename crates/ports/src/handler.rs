//! Record handler boundary contract.

use crate::context::LogContext;
use crate::level::LogLevel;
use crate::record::{Attr, LogRecord};
use std::sync::Arc;
use xlog_shared::Result;

/// A node in a handler chain.
///
/// Wrappers own exactly one child; leaves render or store records. The
/// `with_*` derivations never mutate the receiver: they return a new node that
/// shares the receiver's output (writer, lock, capture store) by reference.
pub trait LogHandler: Send + Sync {
    /// Returns true when records at `level` would be handled.
    fn enabled(&self, level: LogLevel) -> bool;

    /// Handle one record. Write failures are returned, never retried.
    fn handle(&self, ctx: Option<&LogContext>, record: &LogRecord) -> Result<()>;

    /// Derive a handler that adds `attrs` to every record.
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn LogHandler>;

    /// Derive a handler that qualifies subsequent attributes with `name`.
    fn with_group(&self, name: &str) -> Arc<dyn LogHandler>;
}
