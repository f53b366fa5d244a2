//! Resolved logger configuration and the encoding/color decisions.

use crate::env::LoggerEnv;
use crate::environment::Environment;
use std::io::IsTerminal;
use xlog_ports::{ContextKey, LogLevel, LogOutput};

/// A standard stream that may be probed for terminal support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdStream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

impl StdStream {
    /// Returns true when this stream is attached to an interactive terminal.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        match self {
            Self::Stdout => std::io::stdout().is_terminal(),
            Self::Stderr => std::io::stderr().is_terminal(),
        }
    }
}

/// A single configuration override, applied in order by
/// [`LoggerConfig::with_options`]. Later options win for the same field.
#[derive(Debug, Clone)]
pub enum LoggerOption {
    /// Set the deployment environment.
    Env(Environment),
    /// Set the minimum level.
    Level(LogLevel),
    /// Set the output destination.
    Output(LogOutput),
    /// Set the ambient context keys extracted into every record.
    ContextKeys(Vec<ContextKey>),
    /// Enable or disable call-site reporting.
    Source(bool),
    /// Force color on or off, bypassing auto-detection.
    Color(bool),
}

/// Immutable logger configuration.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Deployment environment.
    pub environment: Environment,
    /// Minimum level.
    pub level: LogLevel,
    /// Output destination.
    pub output: LogOutput,
    /// Ambient context keys, in rendering order.
    pub context_keys: Vec<ContextKey>,
    /// Report call sites.
    pub add_source: bool,
    /// Explicit color override; `None` means auto-detect.
    pub color: Option<bool>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::from_env(&LoggerEnv::default())
    }
}

impl LoggerConfig {
    /// Defaults seeded from discovered env settings.
    #[must_use]
    pub fn from_env(env: &LoggerEnv) -> Self {
        Self {
            environment: env.environment,
            level: env.effective_level(),
            output: LogOutput::Stderr,
            context_keys: Vec::new(),
            add_source: false,
            color: None,
        }
    }

    /// Defaults seeded from the process environment.
    #[must_use]
    pub fn from_std_env() -> Self {
        Self::from_env(&LoggerEnv::from_std_env())
    }

    /// Apply a single option.
    #[must_use]
    pub fn apply(mut self, option: LoggerOption) -> Self {
        match option {
            LoggerOption::Env(environment) => self.environment = environment,
            LoggerOption::Level(level) => self.level = level,
            LoggerOption::Output(output) => self.output = output,
            LoggerOption::ContextKeys(keys) => self.context_keys = keys,
            LoggerOption::Source(enabled) => self.add_source = enabled,
            LoggerOption::Color(enabled) => self.color = Some(enabled),
        }
        self
    }

    /// Apply options in order.
    #[must_use]
    pub fn with_options(self, options: impl IntoIterator<Item = LoggerOption>) -> Self {
        options.into_iter().fold(self, Self::apply)
    }

    /// Returns true when the machine-readable (JSON) encoding is used.
    ///
    /// Only the environment decides this: production is always JSON.
    #[must_use]
    pub const fn use_json(&self) -> bool {
        self.environment.is_production()
    }

    /// Returns true when colored output is used, probing real terminals.
    #[must_use]
    pub fn use_color(&self) -> bool {
        self.use_color_with(StdStream::is_terminal)
    }

    /// Color decision with an injectable terminal probe.
    ///
    /// An explicit override wins over everything, including production.
    /// Otherwise production never colors, and other environments color only
    /// when writing to a standard stream that is a terminal.
    #[must_use]
    pub fn use_color_with(&self, probe: impl Fn(StdStream) -> bool) -> bool {
        if let Some(forced) = self.color {
            return forced;
        }
        if self.environment.is_production() {
            return false;
        }
        match self.output {
            LogOutput::Stdout => probe(StdStream::Stdout),
            LogOutput::Stderr => probe(StdStream::Stderr),
            LogOutput::Sink(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Arc;
    use xlog_ports::LogSink;

    struct NullSink;

    impl LogSink for NullSink {
        fn write_line(&self, _line: &str) -> io::Result<()> {
            Ok(())
        }
    }

    fn config(environment: Environment) -> LoggerConfig {
        LoggerConfig::default().apply(LoggerOption::Env(environment))
    }

    #[test]
    fn defaults_write_to_stderr_without_context() {
        let config = LoggerConfig::default();
        assert!(matches!(config.output, LogOutput::Stderr));
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.level, LogLevel::DEBUG);
        assert!(config.context_keys.is_empty());
        assert!(!config.add_source);
        assert_eq!(config.color, None);
    }

    #[test]
    fn later_options_override_earlier_ones() {
        let config = LoggerConfig::default().with_options([
            LoggerOption::Level(LogLevel::ERROR),
            LoggerOption::Source(true),
            LoggerOption::Level(LogLevel::WARN),
            LoggerOption::ContextKeys(vec![ContextKey::REQUEST_ID]),
        ]);
        assert_eq!(config.level, LogLevel::WARN);
        assert!(config.add_source);
        assert_eq!(config.context_keys, vec![ContextKey::REQUEST_ID]);
    }

    #[test]
    fn env_option_does_not_reset_level() {
        let config = LoggerConfig::default().apply(LoggerOption::Env(Environment::Production));
        assert_eq!(config.level, LogLevel::DEBUG);
        assert!(config.use_json());
    }

    #[test]
    fn production_is_json_without_color() {
        let config = config(Environment::Production);
        assert!(config.use_json());
        assert!(!config.use_color_with(|_| true));
    }

    #[test]
    fn explicit_color_wins_even_in_production() {
        let forced_on = config(Environment::Production).apply(LoggerOption::Color(true));
        assert!(forced_on.use_json());
        assert!(forced_on.use_color_with(|_| false));

        let forced_off = config(Environment::Development).apply(LoggerOption::Color(false));
        assert!(!forced_off.use_color_with(|_| true));
    }

    #[test]
    fn auto_color_probes_the_configured_stream() {
        let stdout = config(Environment::Staging).apply(LoggerOption::Output(LogOutput::Stdout));
        assert!(stdout.use_color_with(|stream| stream == StdStream::Stdout));
        assert!(!stdout.use_color_with(|stream| stream == StdStream::Stderr));

        let stderr = config(Environment::Development);
        assert!(stderr.use_color_with(|stream| stream == StdStream::Stderr));
        assert!(!stderr.use_json());
    }

    #[test]
    fn custom_sinks_never_auto_color() {
        let config = config(Environment::Development)
            .apply(LoggerOption::Output(LogOutput::sink(Arc::new(NullSink))));
        assert!(!config.use_color_with(|_| true));
    }
}
