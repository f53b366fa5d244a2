//! Log severity.

use std::fmt;

/// Ordered log severity.
///
/// Levels are numeric so that intermediate severities (for example
/// `LogLevel::new(2)`, between `INFO` and `WARN`) order and classify
/// correctly. The named levels are spaced four apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogLevel(i8);

impl LogLevel {
    /// Debug.
    pub const DEBUG: Self = Self(-4);
    /// Info.
    pub const INFO: Self = Self(0);
    /// Warn.
    pub const WARN: Self = Self(4);
    /// Error.
    pub const ERROR: Self = Self(8);

    /// Create a level from its numeric value.
    #[must_use]
    pub const fn new(value: i8) -> Self {
        Self(value)
    }

    /// Numeric value of the level.
    #[must_use]
    pub const fn as_i8(self) -> i8 {
        self.0
    }

    /// Parse a level name.
    ///
    /// Accepts `debug`, `info`, `warn`/`warning` and `error`, ignoring case and
    /// surrounding whitespace. Anything else, including the empty string,
    /// yields `INFO`. Callers that need strict validation must check the
    /// input themselves.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Self::DEBUG,
            "warn" | "warning" => Self::WARN,
            "error" => Self::ERROR,
            _ => Self::INFO,
        }
    }

    /// Returns true when a record at `level` passes this minimum.
    #[must_use]
    pub const fn allows(self, level: Self) -> bool {
        level.0 >= self.0
    }

    /// The named level at or below this one (`DEBUG` for anything lower).
    #[must_use]
    pub const fn named(self) -> Self {
        if self.0 >= Self::ERROR.0 {
            Self::ERROR
        } else if self.0 >= Self::WARN.0 {
            Self::WARN
        } else if self.0 >= Self::INFO.0 {
            Self::INFO
        } else {
            Self::DEBUG
        }
    }

    /// Bare label of the enclosing named level.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self.named().0 {
            8 => "ERROR",
            4 => "WARN",
            0 => "INFO",
            _ => "DEBUG",
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::INFO
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = self.named();
        let offset = i16::from(self.0) - i16::from(base.0);
        formatter.write_str(self.label())?;
        if offset > 0 {
            write!(formatter, "+{offset}")
        } else if offset < 0 {
            write!(formatter, "{offset}")
        } else {
            Ok(())
        }
    }
}
