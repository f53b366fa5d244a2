//! ANSI-colored handler for interactive terminals.

use crate::format::{display_value, encode_error, flatten, is_skipped};
use serde_json::Value;
use std::fmt::{self, Write as _};
use std::sync::Arc;
use xlog_ports::{Attr, ContextKey, LogContext, LogHandler, LogLevel, LogRecord, LogSink};
use xlog_shared::Result;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";

/// Human-oriented handler rendering one colored line per record:
///
/// ```text
/// 12:30:45 INFO  user signed in request_id=req-123 user=ada
/// ```
///
/// The time is dim, the level label colored and bold (padded to five
/// columns), the message bold. Configured context values follow the message,
/// then accumulated and record attributes with group-qualified keys.
///
/// Context values are rendered directly, so this handler is never wrapped in
/// a [`crate::ContextHandler`].
#[derive(Clone)]
pub struct ColorHandler {
    sink: Arc<dyn LogSink>,
    min_level: LogLevel,
    add_source: bool,
    attrs: Arc<[Attr]>,
    groups: Arc<[Box<str>]>,
    context_keys: Arc<[ContextKey]>,
}

impl ColorHandler {
    /// Create a color handler backed by the provided sink.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            min_level: LogLevel::INFO,
            add_source: false,
            attrs: Arc::from([]),
            groups: Arc::from([]),
            context_keys: Arc::from([]),
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Print the call site after the level label.
    #[must_use]
    pub const fn with_source(mut self, enabled: bool) -> Self {
        self.add_source = enabled;
        self
    }

    /// Context keys rendered after the message, in order.
    #[must_use]
    pub fn with_context_keys(mut self, keys: impl IntoIterator<Item = ContextKey>) -> Self {
        self.context_keys = keys.into_iter().collect();
        self
    }

    fn render(
        &self,
        ctx: Option<&LogContext>,
        record: &LogRecord,
    ) -> std::result::Result<String, fmt::Error> {
        let mut line = String::new();
        write!(line, "{GRAY}{}{RESET} ", record.time.format("%H:%M:%S"))?;
        write!(
            line,
            "{}{BOLD}{:<5}{RESET} ",
            level_color(record.level),
            record.level.label()
        )?;
        if let Some(source) = record.source.filter(|_| self.add_source) {
            write!(line, "{GRAY}{}:{}{RESET} ", source.file, source.line)?;
        }
        write!(line, "{BOLD}{}{RESET}", record.message)?;

        if let Some(ctx) = ctx {
            for key in self.context_keys.iter() {
                if let Some(value) = ctx.non_empty_str(key) {
                    write!(line, " {CYAN}{key}{RESET}={GRAY}{value}{RESET}")?;
                }
            }
        }

        let prefix = self.groups.join(".");
        for attr in self.attrs.iter().chain(record.attrs()) {
            if is_skipped(attr) {
                continue;
            }
            flatten(&prefix, &attr.key, &attr.value, &mut |key: &str, value: &Value| {
                write!(line, " {CYAN}{key}{RESET}={}", display_value(value))
            })?;
        }
        line.push('\n');
        Ok(line)
    }
}

impl LogHandler for ColorHandler {
    fn enabled(&self, level: LogLevel) -> bool {
        self.min_level.allows(level)
    }

    fn handle(&self, ctx: Option<&LogContext>, record: &LogRecord) -> Result<()> {
        let line = self.render(ctx, record).map_err(|_| encode_error("color"))?;
        self.sink.write_line(&line)?;
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn LogHandler> {
        let attrs = self.attrs.iter().cloned().chain(attrs).collect();
        Arc::new(Self {
            attrs,
            ..self.clone()
        })
    }

    fn with_group(&self, name: &str) -> Arc<dyn LogHandler> {
        if name.is_empty() {
            return Arc::new(self.clone());
        }
        let groups = self
            .groups
            .iter()
            .cloned()
            .chain(std::iter::once(Box::from(name)))
            .collect();
        Arc::new(Self {
            groups,
            ..self.clone()
        })
    }
}

const fn level_color(level: LogLevel) -> &'static str {
    match level.named() {
        LogLevel::ERROR => RED,
        LogLevel::WARN => YELLOW,
        LogLevel::INFO => GREEN,
        _ => BLUE,
    }
}
