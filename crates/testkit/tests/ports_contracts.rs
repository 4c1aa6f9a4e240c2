//! Contract-style tests for port traits using in-memory adapters.

use sqllog_ports::{
    EventBuilder, HookField, Level, LogBackend, LogContext, LogFields, LogSink, Severity,
    SqlLogger, Value,
};
use sqllog_shared::CorrelationId;
use sqllog_testkit::{MemoryLogSink, NoopSqlLogger, RecordingBackend};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

fn commit(backend: &dyn LogBackend, ctx: &LogContext, severity: Severity) {
    if let Some(mut event) = backend.start_event(severity, ctx) {
        event.str("query", "SELECT 1");
        event.duration("duration", Duration::from_millis(3));
        event.array("args", &[Value::from(1), Value::from("a")]);
        event.commit("Query");
    }
}

#[test]
fn recording_backend_keeps_typed_values() {
    let backend = RecordingBackend::new();
    commit(&backend, &LogContext::new(), Severity::Info);

    let event = backend.single();
    assert_eq!(event.severity, Severity::Info);
    assert_eq!(event.message, "Query");
    assert_eq!(event.field("query"), Some(&Value::from("SELECT 1")));
    assert_eq!(
        event.field("duration"),
        Some(&Value::from(Duration::from_millis(3)))
    );
    assert_eq!(
        event.field("args"),
        Some(&Value::List(vec![Value::from(1), Value::from("a")]))
    );
}

#[test]
fn recording_backend_runs_hooks_with_context() -> Result<(), Box<dyn Error>> {
    let hook = |ctx: &LogContext, _severity: Severity, _message: &str| -> Vec<HookField> {
        ctx.correlation_id()
            .map(|id| vec![(Box::from("requestId"), Value::from(id.clone()))])
            .unwrap_or_default()
    };
    let backend = RecordingBackend::new().with_hook(hook);

    let ctx = LogContext::new().with_correlation_id(CorrelationId::parse("req_7")?);
    commit(&backend, &ctx, Severity::Debug);
    commit(&backend, &LogContext::new(), Severity::Debug);

    let events = backend.take();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].field("requestId"), Some(&Value::from("req_7")));
    assert!(!events[1].has_field("requestId"));
    Ok(())
}

#[test]
fn recording_backend_honors_min_level() {
    let backend = RecordingBackend::new().with_min_level(Severity::Error);
    commit(&backend, &LogContext::new(), Severity::Info);
    assert!(backend.events().is_empty());
}

#[test]
fn shared_backend_handles_are_backends() {
    let backend = Arc::new(RecordingBackend::new());
    let shared: Arc<dyn LogBackend> = backend.clone();
    commit(&shared, &LogContext::new(), Severity::Trace);
    assert_eq!(backend.events().len(), 1);
}

#[test]
fn memory_sink_captures_lines() {
    let sink = MemoryLogSink::new();
    sink.write_line("{\"a\":1}\n");
    sink.write_line("{\"b\":2}\n");

    let lines = sink.take_json();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["a"], 1);
    assert!(sink.lines().is_empty());
}

#[test]
fn noop_logger_accepts_every_level() {
    let logger = NoopSqlLogger;
    let fields = LogFields::new();
    logger.log(&LogContext::new(), Level::from_raw(99), "Query", &fields);
    logger.error(&LogContext::new(), "Query", &fields);
}
