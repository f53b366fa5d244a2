//! Helpers shared by the line renderers.

use chrono::{DateTime, Offset, TimeZone, Timelike};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use xlog_ports::Attr;
use xlog_shared::{ErrorClass, ErrorCode, ErrorEnvelope};

/// Attributes and groups accumulated by `with_attrs`/`with_group` derivations.
///
/// Each preset attribute remembers how many groups were open when it was
/// added, so it renders under that prefix of the group stack only.
#[derive(Debug, Clone, Default)]
pub(crate) struct Scope {
    groups: Arc<[Box<str>]>,
    preset: Arc<[(usize, Attr)]>,
}

impl Scope {
    pub(crate) fn with_attrs(&self, attrs: Vec<Attr>) -> Self {
        let depth = self.groups.len();
        let preset = self
            .preset
            .iter()
            .cloned()
            .chain(attrs.into_iter().map(|attr| (depth, attr)))
            .collect();
        Self {
            groups: Arc::clone(&self.groups),
            preset,
        }
    }

    pub(crate) fn with_group(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        let groups = self
            .groups
            .iter()
            .cloned()
            .chain(std::iter::once(Box::from(name)))
            .collect();
        Self {
            groups,
            preset: Arc::clone(&self.preset),
        }
    }

    /// All open groups, outermost first.
    pub(crate) fn groups(&self) -> &[Box<str>] {
        &self.groups
    }

    /// Preset attributes with the group path each one belongs to.
    pub(crate) fn preset(&self) -> impl Iterator<Item = (&[Box<str>], &Attr)> {
        self.preset
            .iter()
            .map(|(depth, attr)| (self.groups.get(..*depth).unwrap_or_default(), attr))
    }
}

/// Returns true when an attribute contributes nothing to the output.
pub(crate) fn is_skipped(attr: &Attr) -> bool {
    attr.is_empty() || attr.value.as_object().is_some_and(Map::is_empty)
}

/// Join a dot-qualified prefix and a key.
pub(crate) fn qualify(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else if key.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Walk an attribute, calling `emit` with the dot-qualified key of every leaf.
/// Groups recurse; empty groups and zero attributes emit nothing.
pub(crate) fn flatten<E>(
    prefix: &str,
    key: &str,
    value: &Value,
    emit: &mut impl FnMut(&str, &Value) -> Result<(), E>,
) -> Result<(), E> {
    if key.is_empty() && value.is_null() {
        return Ok(());
    }
    let qualified = qualify(prefix, key);
    match value {
        Value::Object(members) => {
            for (member_key, member_value) in members {
                flatten(&qualified, member_key, member_value, emit)?;
            }
            Ok(())
        }
        leaf => emit(&qualified, leaf),
    }
}

/// Plain rendering of a value: strings unquoted, null as `<nil>`, everything
/// else as compact JSON.
pub(crate) fn display_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(text) => Cow::Borrowed(text),
        Value::Null => Cow::Borrowed("<nil>"),
        other => Cow::Owned(other.to_string()),
    }
}

/// RFC 3339 with up to nanosecond precision: trailing fractional zeros are
/// trimmed (the fraction is dropped entirely when zero) and a zero offset
/// prints as `Z`.
pub(crate) fn rfc3339_nano<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    let mut out = time.format("%Y-%m-%dT%H:%M:%S").to_string();
    let nanos = time.nanosecond() % 1_000_000_000;
    if nanos > 0 {
        let digits = format!("{nanos:09}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    if time.offset().fix().local_minus_utc() == 0 {
        out.push('Z');
    } else {
        out.push_str(&time.format("%:z").to_string());
    }
    out
}

pub(crate) fn encode_error(format: &str) -> ErrorEnvelope {
    ErrorEnvelope::new(
        ErrorCode::encode_failed(),
        format!("failed to render {format} log line"),
        ErrorClass::NonRetriable,
    )
}
