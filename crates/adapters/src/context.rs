//! Handler wrapper that copies ambient context values into records.

use std::sync::Arc;
use xlog_ports::{Attr, ContextKey, LogContext, LogHandler, LogLevel, LogRecord};
use xlog_shared::Result;

/// Wraps another handler and appends configured context values to every
/// record as top-level attributes.
///
/// Only non-empty string values are copied. When anything is added the
/// record is cloned first, so the caller's record is never mutated.
#[derive(Clone)]
pub struct ContextHandler {
    inner: Arc<dyn LogHandler>,
    keys: Arc<[ContextKey]>,
}

impl ContextHandler {
    /// Wrap `inner`, extracting `keys` in order.
    pub fn new(inner: Arc<dyn LogHandler>, keys: impl IntoIterator<Item = ContextKey>) -> Self {
        Self {
            inner,
            keys: keys.into_iter().collect(),
        }
    }

    fn context_attrs(&self, ctx: &LogContext) -> Vec<Attr> {
        self.keys
            .iter()
            .filter_map(|key| {
                ctx.non_empty_str(key)
                    .map(|value| Attr::new(key.as_str(), value))
            })
            .collect()
    }
}

impl LogHandler for ContextHandler {
    fn enabled(&self, level: LogLevel) -> bool {
        self.inner.enabled(level)
    }

    fn handle(&self, ctx: Option<&LogContext>, record: &LogRecord) -> Result<()> {
        let extra = match ctx {
            Some(ctx) if !self.keys.is_empty() => self.context_attrs(ctx),
            _ => Vec::new(),
        };
        if extra.is_empty() {
            return self.inner.handle(ctx, record);
        }
        let enriched = record.clone().with_attrs(extra);
        self.inner.handle(ctx, &enriched)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn LogHandler> {
        Arc::new(Self {
            inner: self.inner.with_attrs(attrs),
            keys: Arc::clone(&self.keys),
        })
    }

    fn with_group(&self, name: &str) -> Arc<dyn LogHandler> {
        Arc::new(Self {
            inner: self.inner.with_group(name),
            keys: Arc::clone(&self.keys),
        })
    }
}
