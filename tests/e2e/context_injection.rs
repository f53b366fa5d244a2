//! Ambient context E2E tests: injection into JSON and text lines, inline
//! rendering on the color path.

use serde_json::{Value, json};
use std::error::Error;
use std::sync::Arc;
use xlog::{
    ContextKey, Environment, LogContext, LogLevel, LogOutput, LogSink, Logger, LoggerConfig,
    LoggerOption, MemoryLogSink,
};

fn config(sink: &Arc<MemoryLogSink>, environment: Environment, color: bool) -> LoggerConfig {
    let shared: Arc<dyn LogSink> = sink.clone();
    LoggerConfig::default().with_options([
        LoggerOption::Env(environment),
        LoggerOption::Level(LogLevel::DEBUG),
        LoggerOption::Output(LogOutput::sink(shared)),
        LoggerOption::ContextKeys(vec![ContextKey::REQUEST_ID, ContextKey::TRACE_ID]),
        LoggerOption::Color(color),
    ])
}

fn request_context() -> LogContext {
    LogContext::new()
        .with_request_id("req-123")
        .with_trace_id("trace-456")
        .with_user_id("not-configured")
}

fn strip_ansi(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_escape = false;
    for ch in line.chars() {
        match (in_escape, ch) {
            (false, '\x1b') => in_escape = true,
            (true, 'm') => in_escape = false,
            (false, _) => out.push(ch),
            (true, _) => {},
        }
    }
    out
}

#[test]
fn json_leaf_gets_top_level_context_fields() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(MemoryLogSink::new());
    let logger = xlog::from_config(&config(&sink, Environment::Production, false));

    logger.info_ctx(&request_context(), "handled", &[json!("status"), json!(200)])?;

    let line = sink.contents();
    assert!(line.contains("\"request_id\":\"req-123\""), "{line}");
    assert!(line.contains("\"trace_id\":\"trace-456\""), "{line}");
    let value: Value = serde_json::from_str(&line)?;
    assert_eq!(value["status"], 200);
    assert!(value.get("user_id").is_none());
    Ok(())
}

#[test]
fn injected_context_follows_the_open_group() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(MemoryLogSink::new());
    let logger = xlog::from_config(&config(&sink, Environment::Production, false))
        .with_group("http");

    logger.warn_ctx(&request_context(), "slow", &[json!("ms"), json!(900)])?;

    let value: Value = serde_json::from_str(&sink.contents())?;
    assert_eq!(value["http"]["ms"], 900);
    assert_eq!(value["http"]["request_id"], "req-123");
    Ok(())
}

#[test]
fn color_leaf_renders_context_after_the_message() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(MemoryLogSink::new());
    let logger = xlog::from_config(&config(&sink, Environment::Development, true));

    logger.info_ctx(&request_context(), "handled", &[json!("status"), json!(200)])?;

    let plain = strip_ansi(&sink.contents());
    let message_at = plain.find("handled").ok_or("missing message")?;
    let request_at = plain.find("request_id=req-123").ok_or("missing request id")?;
    let trace_at = plain.find("trace_id=trace-456").ok_or("missing trace id")?;
    let status_at = plain.find("status=200").ok_or("missing status")?;
    assert!(message_at < request_at && request_at < trace_at && trace_at < status_at);
    assert!(!plain.contains("user_id"));
    Ok(())
}

#[test]
fn text_leaf_appends_context_after_record_attributes() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(MemoryLogSink::new());
    let logger = xlog::from_config(&config(&sink, Environment::Staging, false));

    logger.error_ctx(&request_context(), "failed", &[json!("status"), json!(500)])?;

    let line = sink.contents();
    assert!(
        line.ends_with(" msg=failed status=500 request_id=req-123 trace_id=trace-456\n"),
        "{line}"
    );
    Ok(())
}

#[test]
fn missing_or_empty_values_are_skipped() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(MemoryLogSink::new());
    let logger = xlog::from_config(&config(&sink, Environment::Staging, false));
    let ctx = LogContext::new()
        .with_request_id("")
        .with_value(ContextKey::TRACE_ID, 7);

    logger.info_ctx(&ctx, "sparse", &[])?;
    logger.info("no context", &[])?;

    let lines = sink.take();
    assert!(lines[0].ends_with(" msg=sparse\n"), "{}", lines[0]);
    assert!(lines[1].ends_with(" msg=\"no context\"\n"), "{}", lines[1]);
    Ok(())
}
