//! In-memory capture logger for assertions in tests.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use xlog_ports::{LogContext, LogHandler, LogLevel, Logger};
use xlog_shared::Result;

/// A captured log call.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Severity.
    pub level: LogLevel,
    /// Message.
    pub message: String,
    /// Attributes keyed by group-qualified name.
    pub attrs: BTreeMap<String, Value>,
}

impl LogEntry {
    /// Attribute value by qualified key.
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }
}

/// Logger that records entries instead of rendering them.
///
/// Loggers derived with `with`/`with_group` share the parent's entry store, so
/// their entries are visible (and cleared) through every related logger.
/// Arguments pair leniently: a pair whose key is not a string is dropped, as
/// is a trailing unpaired argument. Attributes added with `with` keep their
/// keys as given; only keys logged directly are qualified by the group
/// prefix. The ambient context is ignored.
#[derive(Debug, Clone, Default)]
pub struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
    attrs: BTreeMap<String, Value>,
    group: String,
}

impl CaptureLogger {
    /// Create a logger with an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record an entry directly.
    pub fn record(&self, level: LogLevel, message: &str, args: &[Value]) {
        let mut attrs = self.attrs.clone();
        for (key, value) in pairs(args) {
            let key = if self.group.is_empty() {
                key.to_string()
            } else {
                format!("{}.{key}", self.group)
            };
            attrs.insert(key, value.clone());
        }
        self.store().push(LogEntry {
            level,
            message: message.to_string(),
            attrs,
        });
    }

    /// Derive a logger with extra attributes, sharing this store.
    pub fn scoped(&self, args: &[Value]) -> Self {
        let mut attrs = self.attrs.clone();
        for (key, value) in pairs(args) {
            attrs.insert(key.to_string(), value.clone());
        }
        Self {
            entries: Arc::clone(&self.entries),
            attrs,
            group: self.group.clone(),
        }
    }

    /// Derive a logger whose logged keys are prefixed by `name`, sharing this
    /// store.
    pub fn grouped(&self, name: &str) -> Self {
        let group = match (self.group.is_empty(), name.is_empty()) {
            (_, true) => self.group.clone(),
            (true, false) => name.to_string(),
            (false, false) => format!("{}.{name}", self.group),
        };
        Self {
            entries: Arc::clone(&self.entries),
            attrs: self.attrs.clone(),
            group,
        }
    }

    /// Copy of every captured entry, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.store().clone()
    }

    /// Remove all entries from the shared store.
    pub fn clear(&self) {
        self.store().clear();
    }

    /// Returns true when an entry at `level` has a message containing `needle`.
    pub fn has_entry(&self, level: LogLevel, needle: &str) -> bool {
        self.store()
            .iter()
            .any(|entry| entry.level == level && entry.message.contains(needle))
    }

    /// Like [`Self::has_entry`], additionally requiring `key` to equal `value`.
    pub fn has_entry_with_attr(
        &self,
        level: LogLevel,
        needle: &str,
        key: &str,
        value: impl Into<Value>,
    ) -> bool {
        let value = value.into();
        self.store().iter().any(|entry| {
            entry.level == level
                && entry.message.contains(needle)
                && entry.attrs.get(key) == Some(&value)
        })
    }

    /// Number of entries at `level`.
    pub fn count(&self, level: LogLevel) -> usize {
        self.store().iter().filter(|entry| entry.level == level).count()
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.store().len()
    }

    /// Returns true when nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.store().is_empty()
    }
}

fn pairs(args: &[Value]) -> impl Iterator<Item = (&str, &Value)> {
    args.chunks_exact(2)
        .filter_map(|pair| match pair {
            [Value::String(key), value] => Some((key.as_str(), value)),
            _ => None,
        })
}

impl Logger for CaptureLogger {
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }

    fn log(
        &self,
        _ctx: Option<&LogContext>,
        level: LogLevel,
        message: &str,
        args: &[Value],
    ) -> Result<()> {
        self.record(level, message, args);
        Ok(())
    }

    fn with(&self, args: &[Value]) -> Box<dyn Logger> {
        Box::new(self.scoped(args))
    }

    fn with_group(&self, name: &str) -> Box<dyn Logger> {
        Box::new(self.grouped(name))
    }

    fn handler(&self) -> Option<Arc<dyn LogHandler>> {
        None
    }
}
