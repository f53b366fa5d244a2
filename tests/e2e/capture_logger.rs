//! Capture logger E2E tests: the test double behind the shared `Logger`
//! contract.

use serde_json::json;
use std::error::Error;
use xlog::{LogLevel, Logger};
use xlog_testkit::CaptureLogger;

fn log_through(logger: &dyn Logger) -> Result<(), Box<dyn Error>> {
    logger.info("x", &[json!("k"), json!("v")])?;
    Ok(())
}

#[test]
fn capture_logger_stands_in_for_the_real_logger() -> Result<(), Box<dyn Error>> {
    let capture = CaptureLogger::new();
    log_through(&capture)?;

    assert!(capture.has_entry_with_attr(LogLevel::INFO, "x", "k", "v"));
    capture.clear();
    assert_eq!(capture.len(), 0);
    Ok(())
}

#[test]
fn child_entries_are_visible_to_the_parent() -> Result<(), Box<dyn Error>> {
    let parent = CaptureLogger::new();
    let child = parent.with(&[json!("service"), json!("api")]);

    child.info("child message", &[])?;

    assert!(parent.has_entry_with_attr(LogLevel::INFO, "child", "service", "api"));
    assert_eq!(parent.count(LogLevel::INFO), 1);
    Ok(())
}

#[test]
fn clearing_any_holder_clears_the_shared_store() -> Result<(), Box<dyn Error>> {
    let parent = CaptureLogger::new();
    let child = parent.grouped("job");
    parent.warn("parent", &[])?;
    child.warn("child", &[json!("id"), json!(7)])?;
    assert!(parent.has_entry_with_attr(LogLevel::WARN, "child", "job.id", 7));

    child.clear();

    assert_eq!(parent.len(), 0);
    assert!(parent.entries().is_empty());
    Ok(())
}

#[test]
fn concurrent_children_append_every_entry() -> Result<(), Box<dyn Error>> {
    let parent = CaptureLogger::new();
    std::thread::scope(|scope| {
        for worker in 0..4 {
            let child = parent.scoped(&[json!("worker"), json!(worker)]);
            scope.spawn(move || {
                for _ in 0..25 {
                    child.record(LogLevel::DEBUG, "tick", &[]);
                }
            });
        }
    });

    assert_eq!(parent.count(LogLevel::DEBUG), 100);
    assert!(parent.has_entry_with_attr(LogLevel::DEBUG, "tick", "worker", 3));
    Ok(())
}
