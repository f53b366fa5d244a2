//! Test fixtures for sink failures and error envelopes.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use xlog_ports::LogSink;
use xlog_shared::{ErrorCode, ErrorEnvelope};

/// Error codes a sink failure may surface as.
pub fn sink_error_codes() -> Vec<ErrorCode> {
    vec![
        ErrorCode::io(),
        ErrorCode::not_found(),
        ErrorCode::permission_denied(),
        ErrorCode::timeout(),
        ErrorCode::interrupted(),
    ]
}

/// A broken-pipe error converted the way handlers convert sink failures.
pub fn broken_pipe_error() -> ErrorEnvelope {
    ErrorEnvelope::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
}

/// Sink that fails every write with the configured error kind.
#[derive(Debug)]
pub struct FailingSink {
    kind: io::ErrorKind,
    attempts: AtomicUsize,
}

impl FailingSink {
    /// Fail with `kind`.
    pub const fn new(kind: io::ErrorKind) -> Self {
        Self {
            kind,
            attempts: AtomicUsize::new(0),
        }
    }

    /// Fail like a closed pipe.
    pub const fn broken_pipe() -> Self {
        Self::new(io::ErrorKind::BrokenPipe)
    }

    /// Number of writes attempted so far.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl LogSink for FailingSink {
    fn write_line(&self, _line: &str) -> io::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(io::Error::new(self.kind, "sink rejected write"))
    }
}
