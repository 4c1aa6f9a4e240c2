//! In-memory implementations of the sqllog ports.
//!
//! These implementations are intended for:
//! - Contract tests of the SQL logger adapter
//! - Asserting on exactly what a backend received, before any rendering
//! - Capturing serialized lines without touching stdio or files

use sqllog_ports::{
    EventBuilder, EventHook, Level, LogBackend, LogContext, LogFields, LogSink, Severity,
    SqlLogger, Value,
};
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

/// A SQL logger that drops every event.
#[derive(Debug, Default)]
pub struct NoopSqlLogger;

impl SqlLogger for NoopSqlLogger {
    fn log(&self, _ctx: &LogContext, _level: Level, _message: &str, _fields: &LogFields) {}
}

/// Log sink keeping every line in memory.
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("memory sink lock").clone()
    }

    /// Drain the captured lines.
    pub fn take(&self) -> Vec<String> {
        let mut guard = self.lines.lock().expect("memory sink lock");
        std::mem::take(&mut *guard)
    }

    /// Drain the captured lines and parse each one as JSON.
    pub fn take_json(&self) -> Vec<serde_json::Value> {
        self.take()
            .iter()
            .map(|line| serde_json::from_str(line.trim_end()).expect("sink line is JSON"))
            .collect()
    }
}

impl LogSink for MemoryLogSink {
    fn write_line(&self, line: &str) {
        let mut guard = self.lines.lock().expect("memory sink lock");
        guard.push(line.to_string());
    }
}

/// One committed event as the backend received it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    /// Severity the event was started at.
    pub severity: Severity,
    /// Commit message.
    pub message: String,
    /// Fields from setters, then hooks.
    pub fields: LogFields,
}

impl RecordedEvent {
    /// Look up a field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns `true` when the event carries `key`.
    pub fn has_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }
}

/// Backend recording each committed event with its typed values.
pub struct RecordingBackend {
    events: Mutex<Vec<RecordedEvent>>,
    hooks: Vec<Arc<dyn EventHook>>,
    min_level: Severity,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            hooks: Vec::new(),
            min_level: Severity::Trace,
        }
    }
}

impl fmt::Debug for RecordingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingBackend")
            .field("events", &self.events())
            .field("hooks", &self.hooks.len())
            .field("min_level", &self.min_level)
            .finish()
    }
}

impl RecordingBackend {
    /// A backend accepting every severity, without hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a commit-time hook.
    #[must_use]
    pub fn with_hook(mut self, hook: impl EventHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Drop events below `level`.
    #[must_use]
    pub fn with_min_level(mut self, level: Severity) -> Self {
        self.min_level = level;
        self
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().expect("recording lock").clone()
    }

    /// Drain the recorded events.
    pub fn take(&self) -> Vec<RecordedEvent> {
        let mut guard = self.events.lock().expect("recording lock");
        std::mem::take(&mut *guard)
    }

    /// The only recorded event; panics unless exactly one was committed.
    pub fn single(&self) -> RecordedEvent {
        let mut events = self.take();
        assert_eq!(events.len(), 1, "expected exactly one event: {events:?}");
        events.remove(0)
    }
}

impl LogBackend for RecordingBackend {
    fn start_event<'a>(
        &'a self,
        severity: Severity,
        ctx: &'a LogContext,
    ) -> Option<Box<dyn EventBuilder + 'a>> {
        if !severity.is_at_least(self.min_level) {
            return None;
        }
        Some(Box::new(RecordingEvent {
            backend: self,
            ctx,
            severity,
            fields: LogFields::new(),
        }))
    }
}

struct RecordingEvent<'a> {
    backend: &'a RecordingBackend,
    ctx: &'a LogContext,
    severity: Severity,
    fields: LogFields,
}

impl RecordingEvent<'_> {
    fn set(&mut self, key: &str, value: Value) {
        self.fields.insert(Box::from(key), value);
    }
}

impl EventBuilder for RecordingEvent<'_> {
    fn int(&mut self, key: &str, value: i64) {
        self.set(key, Value::Int(value));
    }

    fn uint(&mut self, key: &str, value: u64) {
        self.set(key, Value::UInt(value));
    }

    fn float(&mut self, key: &str, value: f64) {
        self.set(key, Value::Float(value));
    }

    fn bool(&mut self, key: &str, value: bool) {
        self.set(key, Value::Bool(value));
    }

    fn str(&mut self, key: &str, value: &str) {
        self.set(key, Value::from(value));
    }

    fn time(&mut self, key: &str, value: SystemTime) {
        self.set(key, Value::Time(value));
    }

    fn duration(&mut self, key: &str, value: Duration) {
        self.set(key, Value::Duration(value));
    }

    fn array(&mut self, key: &str, values: &[Value]) {
        self.set(key, Value::List(values.to_vec()));
    }

    fn map(&mut self, key: &str, values: &LogFields) {
        self.set(key, Value::Map(values.clone()));
    }

    fn commit(mut self: Box<Self>, message: &str) {
        let backend = self.backend;
        for hook in &backend.hooks {
            for (key, value) in hook.run(self.ctx, self.severity, message) {
                if !value.is_null() {
                    self.fields.insert(key, value);
                }
            }
        }
        let event = RecordedEvent {
            severity: self.severity,
            message: message.to_string(),
            fields: std::mem::take(&mut self.fields),
        };
        backend
            .events
            .lock()
            .expect("recording lock")
            .push(event);
    }
}
