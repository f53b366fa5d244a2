//! Deployment environment.

use serde::{Deserialize, Serialize};
use std::fmt;
use xlog_ports::LogLevel;

/// Deployment environment a logger runs in.
///
/// Production selects the machine-readable encoding; the other environments
/// render human-readable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production.
    Production,
    /// Staging.
    Staging,
    /// Local development.
    #[default]
    Development,
}

impl Environment {
    /// Parse an environment name, falling back to `Development`.
    ///
    /// Accepts `production`/`prod`, `staging`/`stage` and
    /// `development`/`dev`, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        Self::recognize(value).unwrap_or_default()
    }

    /// Parse an environment name, returning `None` when it is not recognized.
    #[must_use]
    pub fn recognize(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "staging" | "stage" => Some(Self::Staging),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Development => "development",
        }
    }

    /// Minimum level used when none is configured.
    #[must_use]
    pub const fn default_level(self) -> LogLevel {
        match self {
            Self::Production => LogLevel::INFO,
            Self::Staging | Self::Development => LogLevel::DEBUG,
        }
    }

    /// Returns true for production.
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
