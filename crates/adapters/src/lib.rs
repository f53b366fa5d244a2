//! # xlog-adapters
//!
//! Handler and sink implementations for the xlog ports: the JSON, text and
//! color renderers, the context-injecting wrapper, the discard handler and
//! the output sinks. This crate depends on `ports` and `shared`.

pub mod color;
pub mod context;
pub mod discard;
mod format;
pub mod json;
pub mod log_sink;
pub mod text;

pub use color::ColorHandler;
pub use context::ContextHandler;
pub use discard::DiscardHandler;
pub use json::JsonHandler;
pub use log_sink::{
    MemoryLogSink, StderrLogSink, StdoutLogSink, WriterLogSink, sink_for_output,
};
pub use text::TextHandler;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
