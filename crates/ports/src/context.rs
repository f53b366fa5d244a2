//! Ambient call-scoped context carried alongside log calls.
//!
//! A `LogContext` is an immutable key/value store. Deriving a context
//! (`with_request_id`, `with_value`, ...) returns a new value and leaves the
//! receiver untouched, so a context can be shared freely across tasks.

use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Lookup key into a [`LogContext`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextKey(Cow<'static, str>);

impl ContextKey {
    /// Request identifier.
    pub const REQUEST_ID: Self = Self::from_static("request_id");
    /// Trace identifier.
    pub const TRACE_ID: Self = Self::from_static("trace_id");
    /// Span identifier.
    pub const SPAN_ID: Self = Self::from_static("span_id");
    /// User identifier.
    pub const USER_ID: Self = Self::from_static("user_id");

    /// Create a key from a static name.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create a key from any string.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Borrow the key name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The four well-known identifier keys, in injection order.
    #[must_use]
    pub fn well_known() -> Vec<Self> {
        vec![
            Self::REQUEST_ID,
            Self::TRACE_ID,
            Self::SPAN_ID,
            Self::USER_ID,
        ]
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&'static str> for ContextKey {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

/// Immutable request-scoped values read by context-aware handlers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogContext {
    values: Arc<BTreeMap<ContextKey, Value>>,
}

impl LogContext {
    /// Empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a context with `key` set to `value`.
    #[must_use]
    pub fn with_value(&self, key: ContextKey, value: impl Into<Value>) -> Self {
        let mut values = Arc::clone(&self.values);
        Arc::make_mut(&mut values).insert(key, value.into());
        Self { values }
    }

    /// Derive a context carrying a request id.
    #[must_use]
    pub fn with_request_id(&self, request_id: impl Into<String>) -> Self {
        self.with_value(ContextKey::REQUEST_ID, request_id.into())
    }

    /// Derive a context carrying a trace id.
    #[must_use]
    pub fn with_trace_id(&self, trace_id: impl Into<String>) -> Self {
        self.with_value(ContextKey::TRACE_ID, trace_id.into())
    }

    /// Derive a context carrying a span id.
    #[must_use]
    pub fn with_span_id(&self, span_id: impl Into<String>) -> Self {
        self.with_value(ContextKey::SPAN_ID, span_id.into())
    }

    /// Derive a context carrying a user id.
    #[must_use]
    pub fn with_user_id(&self, user_id: impl Into<String>) -> Self {
        self.with_value(ContextKey::USER_ID, user_id.into())
    }

    /// Raw value stored under `key`.
    #[must_use]
    pub fn value(&self, key: &ContextKey) -> Option<&Value> {
        self.values.get(key)
    }

    /// String stored under `key`, if the value is a string.
    #[must_use]
    pub fn str_value(&self, key: &ContextKey) -> Option<&str> {
        self.value(key).and_then(Value::as_str)
    }

    /// String stored under `key`, only when it is a non-empty string.
    ///
    /// This is the rule handlers use to decide whether a key is attached to a
    /// record: absent keys, non-string values and empty strings are skipped.
    #[must_use]
    pub fn non_empty_str(&self, key: &ContextKey) -> Option<&str> {
        self.str_value(key).filter(|value| !value.is_empty())
    }

    /// Request id, if set to a string.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.str_value(&ContextKey::REQUEST_ID)
    }

    /// Trace id, if set to a string.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.str_value(&ContextKey::TRACE_ID)
    }

    /// Span id, if set to a string.
    #[must_use]
    pub fn span_id(&self) -> Option<&str> {
        self.str_value(&ContextKey::SPAN_ID)
    }

    /// User id, if set to a string.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.str_value(&ContextKey::USER_ID)
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_context_leaves_parent_untouched() {
        let parent = LogContext::new().with_request_id("req-1");
        let child = parent.with_trace_id("trace-1");

        assert_eq!(parent.trace_id(), None);
        assert_eq!(child.request_id(), Some("req-1"));
        assert_eq!(child.trace_id(), Some("trace-1"));
        assert_eq!(parent.len(), 1);
        assert_eq!(child.len(), 2);
    }

    #[test]
    fn helpers_set_fixed_keys() {
        let ctx = LogContext::new()
            .with_request_id("r")
            .with_trace_id("t")
            .with_span_id("s")
            .with_user_id("u");

        assert_eq!(ctx.str_value(&ContextKey::REQUEST_ID), Some("r"));
        assert_eq!(ctx.str_value(&ContextKey::TRACE_ID), Some("t"));
        assert_eq!(ctx.str_value(&ContextKey::SPAN_ID), Some("s"));
        assert_eq!(ctx.str_value(&ContextKey::USER_ID), Some("u"));
    }

    #[test]
    fn non_empty_str_skips_empty_and_non_string_values() {
        let tenant = ContextKey::new("tenant");
        let ctx = LogContext::new()
            .with_request_id("")
            .with_value(tenant.clone(), 42);

        assert_eq!(ctx.request_id(), Some(""));
        assert_eq!(ctx.non_empty_str(&ContextKey::REQUEST_ID), None);
        assert_eq!(ctx.str_value(&tenant), None);
        assert_eq!(ctx.non_empty_str(&ContextKey::TRACE_ID), None);
    }

    #[test]
    fn custom_keys_compare_by_name() {
        assert_eq!(ContextKey::new(String::from("request_id")), ContextKey::REQUEST_ID);
        assert_eq!(ContextKey::REQUEST_ID.to_string(), "request_id");
    }
}
