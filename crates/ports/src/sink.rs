//! Output destinations for rendered log lines.

use std::fmt;
use std::io;
use std::sync::Arc;

/// A sink that receives fully rendered log lines.
///
/// Implementations serialize concurrent writers themselves: one `write_line`
/// call is one uninterrupted write of the whole line.
pub trait LogSink: Send + Sync {
    /// Write a line (including its trailing newline) to the sink.
    fn write_line(&self, line: &str) -> io::Result<()>;
}

/// Where a logger writes.
///
/// The standard streams are distinguished from arbitrary sinks because only
/// they are probed for terminal support when deciding on color.
#[derive(Clone, Default)]
pub enum LogOutput {
    /// Process standard output.
    Stdout,
    /// Process standard error.
    #[default]
    Stderr,
    /// Any other destination (file, buffer, pipe).
    Sink(Arc<dyn LogSink>),
}

impl LogOutput {
    /// Wrap a custom sink.
    pub fn sink(sink: Arc<dyn LogSink>) -> Self {
        Self::Sink(sink)
    }

    /// Returns true for stdout or stderr.
    #[must_use]
    pub const fn is_std_stream(&self) -> bool {
        matches!(self, Self::Stdout | Self::Stderr)
    }
}

impl fmt::Debug for LogOutput {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => formatter.write_str("Stdout"),
            Self::Stderr => formatter.write_str("Stderr"),
            Self::Sink(_) => formatter.write_str("Sink(..)"),
        }
    }
}
