//! Handler chain composition.

use std::sync::Arc;
use xlog_adapters::{ColorHandler, ContextHandler, JsonHandler, TextHandler, sink_for_output};
use xlog_config::{LoggerConfig, StdStream};
use xlog_ports::LogHandler;

/// The leaf renderer a configuration selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// Machine-readable JSON lines.
    Json,
    /// ANSI-colored lines for terminals.
    Color,
    /// Plain `key=value` lines.
    Text,
}

/// Select the leaf for `config`, probing real terminals.
#[must_use]
pub fn select_handler_kind(config: &LoggerConfig) -> HandlerKind {
    select_handler_kind_with(config, StdStream::is_terminal)
}

/// Select the leaf for `config` with an injectable terminal probe.
///
/// JSON wins whenever the environment asks for it, even if color is forced.
pub fn select_handler_kind_with(
    config: &LoggerConfig,
    probe: impl Fn(StdStream) -> bool,
) -> HandlerKind {
    if config.use_json() {
        HandlerKind::Json
    } else if config.use_color_with(probe) {
        HandlerKind::Color
    } else {
        HandlerKind::Text
    }
}

/// Build the handler chain for `config`.
#[must_use]
pub fn build_handler(config: &LoggerConfig) -> Arc<dyn LogHandler> {
    build_handler_for(config, select_handler_kind(config))
}

/// Build the handler chain for `config` around an explicit leaf kind.
///
/// The color leaf renders context values itself and is returned unwrapped.
/// JSON and text leaves are wrapped in a [`ContextHandler`] when context
/// keys are configured.
#[must_use]
pub fn build_handler_for(config: &LoggerConfig, kind: HandlerKind) -> Arc<dyn LogHandler> {
    let sink = sink_for_output(&config.output);
    tracing::debug!(
        kind = ?kind,
        level = %config.level,
        environment = %config.environment,
        context_keys = config.context_keys.len(),
        "building log handler chain"
    );
    let leaf: Arc<dyn LogHandler> = match kind {
        HandlerKind::Color => {
            return Arc::new(
                ColorHandler::new(sink)
                    .with_min_level(config.level)
                    .with_source(config.add_source)
                    .with_context_keys(config.context_keys.iter().cloned()),
            );
        },
        HandlerKind::Json => Arc::new(
            JsonHandler::new(sink)
                .with_min_level(config.level)
                .with_source(config.add_source),
        ),
        HandlerKind::Text => Arc::new(
            TextHandler::new(sink)
                .with_min_level(config.level)
                .with_source(config.add_source),
        ),
    };
    if config.context_keys.is_empty() {
        leaf
    } else {
        Arc::new(ContextHandler::new(leaf, config.context_keys.iter().cloned()))
    }
}
