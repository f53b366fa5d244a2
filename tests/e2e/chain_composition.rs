//! Chain composition E2E tests: leaf selection, level filtering, group
//! flattening and write-failure propagation through the public facade.

use serde_json::{Value, json};
use std::error::Error;
use std::sync::Arc;
use xlog::{
    Environment, HandlerKind, LogLevel, LogOutput, LogSink, Logger, LoggerConfig, LoggerOption,
    MemoryLogSink,
};
use xlog_shared::{ErrorClass, ErrorCode};
use xlog_testkit::errors::FailingSink;

fn memory_config(
    sink: &Arc<MemoryLogSink>,
    environment: Environment,
    options: impl IntoIterator<Item = LoggerOption>,
) -> LoggerConfig {
    let shared: Arc<dyn LogSink> = sink.clone();
    LoggerConfig::default()
        .with_options([
            LoggerOption::Env(environment),
            LoggerOption::Level(LogLevel::DEBUG),
            LoggerOption::Output(LogOutput::sink(shared)),
        ])
        .with_options(options)
}

fn feed_all_levels(logger: &dyn Logger) -> Result<(), Box<dyn Error>> {
    logger.debug("debug-message", &[])?;
    logger.info("info-message", &[])?;
    logger.warn("warn-message", &[])?;
    logger.error("error-message", &[])?;
    Ok(())
}

#[test]
fn warn_threshold_drops_debug_and_info_for_every_leaf() -> Result<(), Box<dyn Error>> {
    let cases = [
        (Environment::Production, None, HandlerKind::Json),
        (Environment::Development, Some(true), HandlerKind::Color),
        (Environment::Development, None, HandlerKind::Text),
    ];
    for (environment, color, expected_kind) in cases {
        let sink = Arc::new(MemoryLogSink::new());
        let mut options = vec![LoggerOption::Level(LogLevel::WARN)];
        if let Some(color) = color {
            options.push(LoggerOption::Color(color));
        }
        let config = memory_config(&sink, environment, options);
        assert_eq!(xlog::select_handler_kind(&config), expected_kind);

        feed_all_levels(&xlog::from_config(&config))?;

        let output = sink.contents();
        assert!(!output.contains("debug-message"), "{expected_kind:?}: {output}");
        assert!(!output.contains("info-message"), "{expected_kind:?}: {output}");
        assert!(output.contains("warn-message"), "{expected_kind:?}: {output}");
        assert!(output.contains("error-message"), "{expected_kind:?}: {output}");
        assert_eq!(sink.lines().len(), 2);
    }
    Ok(())
}

#[test]
fn nested_groups_flatten_in_color_and_text() -> Result<(), Box<dyn Error>> {
    for color in [true, false] {
        let sink = Arc::new(MemoryLogSink::new());
        let config = memory_config(&sink, Environment::Development, [LoggerOption::Color(color)]);
        let logger = xlog::from_config(&config);

        logger.info("served", &[json!("request"), json!({"method": "GET"})])?;

        let output = sink.contents();
        let expected = if color {
            "\x1b[36mrequest.method\x1b[0m=GET"
        } else {
            " request.method=GET"
        };
        assert!(output.contains(expected), "{output}");
    }
    Ok(())
}

#[test]
fn json_nests_groups_opened_on_the_logger() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(MemoryLogSink::new());
    let config = memory_config(&sink, Environment::Production, Vec::new());
    let logger = xlog::from_config(&config)
        .with(&[json!("service"), json!("api")])
        .with_group("request");

    logger.info("served", &[json!("method"), json!("GET")])?;

    let lines = sink.take();
    let value: Value = serde_json::from_str(&lines[0])?;
    assert_eq!(value["service"], "api");
    assert_eq!(value["request"], json!({"method": "GET"}));
    assert_eq!(value["level"], "INFO");
    Ok(())
}

#[test]
fn derived_loggers_do_not_mutate_the_parent() -> Result<(), Box<dyn Error>> {
    for environment in [Environment::Production, Environment::Development] {
        let sink = Arc::new(MemoryLogSink::new());
        let parent = xlog::from_config(&memory_config(&sink, environment, Vec::new()));
        let child = parent.with(&[json!("child_attr"), json!(1)]).with_group("child_group");

        child.info("from child", &[json!("k"), json!("v")])?;
        parent.info("from parent", &[json!("k"), json!("v")])?;

        let lines = sink.take();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("child_attr"));
        assert!(lines[0].contains("child_group"));
        assert!(!lines[1].contains("child_attr"), "{}", lines[1]);
        assert!(!lines[1].contains("child_group"), "{}", lines[1]);
    }
    Ok(())
}

#[test]
fn call_site_is_reported_when_enabled() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(MemoryLogSink::new());
    let config = memory_config(&sink, Environment::Production, [LoggerOption::Source(true)]);
    let logger = xlog::from_config(&config);

    let call_line = line!() + 1;
    logger.info("with source", &[])?;

    let value: Value = serde_json::from_str(&sink.contents())?;
    let file = value["source"]["file"].as_str().ok_or("missing source file")?;
    assert!(file.ends_with("chain_composition.rs"), "{file}");
    assert_eq!(value["source"]["line"], u64::from(call_line));
    Ok(())
}

#[test]
fn write_failures_propagate_without_retry() {
    let failing = Arc::new(FailingSink::broken_pipe());
    let shared: Arc<dyn LogSink> = failing.clone();
    let config = LoggerConfig::default().with_options([
        LoggerOption::Env(Environment::Production),
        LoggerOption::Level(LogLevel::INFO),
        LoggerOption::Output(LogOutput::sink(shared)),
    ]);
    let logger = xlog::from_config(&config);

    let error = logger.error("lost", &[]).unwrap_err();
    assert_eq!(error.code, ErrorCode::io());
    assert_eq!(error.class, ErrorClass::Retriable);
    assert_eq!(failing.attempts(), 1);

    logger.debug("filtered before the sink", &[]).unwrap();
    assert_eq!(failing.attempts(), 1);
}
