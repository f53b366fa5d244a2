//! Environment variable discovery.
//!
//! Env parsing here is deliberately lenient: unrecognized values fall back to
//! documented defaults instead of failing, and a `tracing` debug event records
//! the fallback. Callers that need strict validation must check the raw
//! variables themselves.

use crate::environment::Environment;
use std::collections::BTreeMap;
use xlog_ports::LogLevel;

/// Env var: deployment environment name.
pub const ENV_XLOG_ENV: &str = "XLOG_ENV";
/// Env var: minimum log level.
pub const ENV_XLOG_LEVEL: &str = "XLOG_LEVEL";

/// Logger settings discovered from the process environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoggerEnv {
    /// Deployment environment (`Development` when unset or unrecognized).
    pub environment: Environment,
    /// Explicit minimum level, when `XLOG_LEVEL` is set and non-empty.
    pub level: Option<LogLevel>,
}

impl LoggerEnv {
    /// Parse env settings from a key/value map (useful for tests and fixtures).
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self {
            environment: parse_environment(map.get(ENV_XLOG_ENV).map(String::as_str)),
            level: parse_level(map.get(ENV_XLOG_LEVEL).map(String::as_str)),
        }
    }

    /// Parse env settings from the current process environment.
    #[must_use]
    pub fn from_std_env() -> Self {
        let mut map = BTreeMap::new();
        for name in [ENV_XLOG_ENV, ENV_XLOG_LEVEL] {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }

        Self::from_map(&map)
    }

    /// The effective minimum level: explicit level, else the environment default.
    #[must_use]
    pub fn effective_level(&self) -> LogLevel {
        self.level
            .unwrap_or_else(|| self.environment.default_level())
    }
}

fn parse_environment(raw: Option<&str>) -> Environment {
    let Some(raw) = raw else {
        return Environment::default();
    };
    Environment::recognize(raw).unwrap_or_else(|| {
        tracing::debug!(
            var = ENV_XLOG_ENV,
            value = raw,
            "unrecognized environment, defaulting to development"
        );
        Environment::default()
    })
}

fn parse_level(raw: Option<&str>) -> Option<LogLevel> {
    let raw = raw.filter(|value| !value.is_empty())?;
    let level = LogLevel::parse(raw);
    if level == LogLevel::INFO && !raw.trim().eq_ignore_ascii_case("info") {
        tracing::debug!(
            var = ENV_XLOG_LEVEL,
            value = raw,
            "unrecognized log level, defaulting to info"
        );
    }
    Some(level)
}
