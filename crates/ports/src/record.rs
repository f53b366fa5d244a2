//! Log records and their attributes.

use crate::level::LogLevel;
use chrono::{DateTime, Local};
use serde_json::{Map, Value};
use std::panic::Location;

/// Key used when a logging argument cannot be paired with a string key.
pub const BAD_KEY: &str = "!BADKEY";

/// A single key/value attribute.
///
/// A `Value::Object` value is an attribute group: its members are nested
/// attributes rendered under the group's key.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    /// Attribute key.
    pub key: Box<str>,
    /// Attribute value.
    pub value: Value,
}

impl Attr {
    /// Create an attribute.
    pub fn new(key: impl Into<Box<str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a named group of attributes. Later duplicate keys win.
    pub fn group(name: impl Into<Box<str>>, attrs: impl IntoIterator<Item = Self>) -> Self {
        let members: Map<String, Value> = attrs
            .into_iter()
            .map(|attr| (attr.key.into_string(), attr.value))
            .collect();
        Self {
            key: name.into(),
            value: Value::Object(members),
        }
    }

    /// Returns true for the zero attribute (empty key, null value).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key.is_empty() && self.value.is_null()
    }
}

/// Convert variadic logging arguments into attributes.
///
/// Arguments are read left to right: a string followed by any value forms a
/// pair; a trailing string without a value, or a non-string where a key is
/// expected, becomes an attribute keyed by [`BAD_KEY`].
#[must_use]
pub fn attrs_from_args(args: &[Value]) -> Vec<Attr> {
    let mut attrs = Vec::with_capacity(args.len() / 2 + 1);
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg {
            Value::String(key) => match iter.next() {
                Some(value) => attrs.push(Attr::new(key.as_str(), value.clone())),
                None => attrs.push(Attr::new(BAD_KEY, key.as_str())),
            },
            other => attrs.push(Attr::new(BAD_KEY, other.clone())),
        }
    }
    attrs
}

/// Call site of a log statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Source file path as reported by the compiler.
    pub file: &'static str,
    /// One-based line number.
    pub line: u32,
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

/// A leveled log record.
///
/// Records are produced fresh for each log call. Handlers that need to add
/// attributes clone the record first; the original is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Time the record was created.
    pub time: DateTime<Local>,
    /// Severity.
    pub level: LogLevel,
    /// Log message.
    pub message: Box<str>,
    /// Call site, when captured.
    pub source: Option<SourceLocation>,
    attrs: Vec<Attr>,
}

impl LogRecord {
    /// Create a record stamped with the current local time.
    pub fn new(level: LogLevel, message: impl Into<Box<str>>) -> Self {
        Self {
            time: Local::now(),
            level,
            message: message.into(),
            source: None,
            attrs: Vec::new(),
        }
    }

    /// Override the record time.
    #[must_use]
    pub const fn with_time(mut self, time: DateTime<Local>) -> Self {
        self.time = time;
        self
    }

    /// Attach a call site.
    #[must_use]
    pub const fn with_source(mut self, source: SourceLocation) -> Self {
        self.source = Some(source);
        self
    }

    /// Append attributes.
    #[must_use]
    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.add_attrs(attrs);
        self
    }

    /// Append attributes in place.
    pub fn add_attrs(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        self.attrs.extend(attrs);
    }

    /// Append variadic logging arguments (see [`attrs_from_args`]).
    pub fn add_args(&mut self, args: &[Value]) {
        self.attrs.extend(attrs_from_args(args));
    }

    /// Attributes in insertion order.
    #[must_use]
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }
}
