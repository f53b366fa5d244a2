//! Structured JSON handler emitting one object per record.

use crate::format::{Scope, encode_error, is_skipped, rfc3339_nano};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use xlog_ports::{Attr, LogContext, LogHandler, LogLevel, LogRecord, LogSink};
use xlog_shared::Result;

/// JSON handler writing one line per record.
///
/// Lines start with `time`, `level`, optional `source` and `msg`, followed by
/// attributes. Groups opened with `with_group` become nested objects.
/// Attribute keys never replace the fixed fields; a colliding key is written
/// as a duplicate member after them.
#[derive(Clone)]
pub struct JsonHandler {
    sink: Arc<dyn LogSink>,
    min_level: LogLevel,
    add_source: bool,
    scope: Scope,
}

impl JsonHandler {
    /// Create a JSON handler backed by the provided sink.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            min_level: LogLevel::INFO,
            add_source: false,
            scope: Scope::default(),
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Report the call site of each record under `source`.
    #[must_use]
    pub const fn with_source(mut self, enabled: bool) -> Self {
        self.add_source = enabled;
        self
    }

    fn derive(&self, scope: Scope) -> Arc<dyn LogHandler> {
        Arc::new(Self {
            sink: Arc::clone(&self.sink),
            min_level: self.min_level,
            add_source: self.add_source,
            scope,
        })
    }

    fn render(&self, record: &LogRecord) -> Result<String> {
        let mut line = JsonLine::new();
        line.field("time", &rfc3339_nano(&record.time))?;
        line.field("level", &record.level.to_string())?;
        if let Some(source) = record.source.filter(|_| self.add_source) {
            line.field("source", &json!({"file": source.file, "line": source.line}))?;
        }
        line.field("msg", &record.message)?;

        for (path, attr) in self.scope.preset() {
            line.attr(path, attr)?;
        }
        for attr in record.attrs() {
            line.attr(self.scope.groups(), attr)?;
        }
        Ok(line.finish())
    }
}

impl LogHandler for JsonHandler {
    fn enabled(&self, level: LogLevel) -> bool {
        self.min_level.allows(level)
    }

    fn handle(&self, _ctx: Option<&LogContext>, record: &LogRecord) -> Result<()> {
        let line = self.render(record)?;
        self.sink.write_line(&line)?;
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn LogHandler> {
        self.derive(self.scope.with_attrs(attrs))
    }

    fn with_group(&self, name: &str) -> Arc<dyn LogHandler> {
        self.derive(self.scope.with_group(name))
    }
}

/// Streaming object writer.
///
/// Members are appended in call order and never merged, so an attribute named
/// like a fixed field (or a group named `level`) is written as a second member
/// instead of replacing the first. Groups are opened lazily by the first
/// attribute that lands in them, so groups without attributes are omitted.
struct JsonLine {
    buf: String,
    needs_comma: bool,
    open_groups: usize,
}

impl JsonLine {
    fn new() -> Self {
        Self {
            buf: String::from("{"),
            needs_comma: false,
            open_groups: 0,
        }
    }

    fn key(&mut self, key: &str) -> Result<()> {
        if self.needs_comma {
            self.buf.push(',');
        }
        self.buf.push_str(&to_json(key)?);
        self.buf.push(':');
        Ok(())
    }

    fn field(&mut self, key: &str, value: &impl Serialize) -> Result<()> {
        self.key(key)?;
        self.buf.push_str(&to_json(value)?);
        self.needs_comma = true;
        Ok(())
    }

    /// Write `attr` inside the groups named by `path`.
    ///
    /// `path` always extends the groups opened so far; preset attributes come
    /// in non-decreasing depth and record attributes use the full path.
    fn attr(&mut self, path: &[Box<str>], attr: &Attr) -> Result<()> {
        if is_skipped(attr) {
            return Ok(());
        }
        while let Some(group) = path.get(self.open_groups) {
            self.key(group)?;
            self.buf.push('{');
            self.needs_comma = false;
            self.open_groups += 1;
        }
        self.field(&attr.key, &attr.value)
    }

    fn finish(mut self) -> String {
        for _ in 0..self.open_groups {
            self.buf.push('}');
        }
        self.buf.push_str("}\n");
        self.buf
    }
}

fn to_json(value: &(impl Serialize + ?Sized)) -> Result<String> {
    serde_json::to_string(value).map_err(|_| encode_error("json"))
}
