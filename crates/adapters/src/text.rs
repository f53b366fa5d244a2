//! Plain `key=value` text handler.

use crate::format::{Scope, display_value, encode_error, flatten, is_skipped};
use chrono::SecondsFormat;
use serde_json::Value;
use std::fmt::{self, Write as _};
use std::sync::Arc;
use xlog_ports::{Attr, LogContext, LogHandler, LogLevel, LogRecord, LogSink};
use xlog_shared::Result;

/// Text handler writing one `key=value` line per record.
#[derive(Clone)]
pub struct TextHandler {
    sink: Arc<dyn LogSink>,
    min_level: LogLevel,
    add_source: bool,
    scope: Scope,
}

impl TextHandler {
    /// Create a text handler backed by the provided sink.
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

    /// Report the call site of each record as `source=file:line`.
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

    fn render(&self, record: &LogRecord) -> std::result::Result<String, fmt::Error> {
        let mut line = String::new();
        write!(
            line,
            "time={} level={}",
            record.time.to_rfc3339_opts(SecondsFormat::Millis, true),
            record.level
        )?;
        if let Some(source) = record.source.filter(|_| self.add_source) {
            write_pair(&mut line, "source", &format!("{}:{}", source.file, source.line))?;
        }
        write_pair(&mut line, "msg", &record.message)?;

        for (path, attr) in self.scope.preset() {
            write_attr(&mut line, &path.join("."), attr)?;
        }
        let prefix = self.scope.groups().join(".");
        for attr in record.attrs() {
            write_attr(&mut line, &prefix, attr)?;
        }
        line.push('\n');
        Ok(line)
    }
}

impl LogHandler for TextHandler {
    fn enabled(&self, level: LogLevel) -> bool {
        self.min_level.allows(level)
    }

    fn handle(&self, _ctx: Option<&LogContext>, record: &LogRecord) -> Result<()> {
        let line = self.render(record).map_err(|_| encode_error("text"))?;
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

fn write_attr(line: &mut String, prefix: &str, attr: &Attr) -> fmt::Result {
    if is_skipped(attr) {
        return Ok(());
    }
    flatten(prefix, &attr.key, &attr.value, &mut |key: &str, value: &Value| {
        write_pair(line, key, &display_value(value))
    })
}

fn write_pair(line: &mut String, key: &str, value: &str) -> fmt::Result {
    line.push(' ');
    write_token(line, key)?;
    line.push('=');
    write_token(line, value)
}

fn write_token(line: &mut String, token: &str) -> fmt::Result {
    if needs_quoting(token) {
        let quoted = serde_json::to_string(token).map_err(|_| fmt::Error)?;
        line.push_str(&quoted);
    } else {
        line.push_str(token);
    }
    Ok(())
}

fn needs_quoting(token: &str) -> bool {
    token.is_empty()
        || token
            .chars()
            .any(|ch| ch.is_whitespace() || ch == '=' || ch == '"' || ch.is_control())
}
