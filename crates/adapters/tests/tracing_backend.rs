//! Tracing backend output captured through a JSON `tracing-subscriber`.

use sqllog_adapters::{BackendSqlLogger, HookChain, TRACING_TARGET, TracingBackend};
use sqllog_ports::{Level, LogContext, LogFields, Severity, SqlLogger, Value};
use serde_json::{Value as Json, json};
use std::error::Error;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn json_lines(&self) -> Result<Vec<Json>, Box<dyn Error>> {
        let bytes = self.0.lock().map_err(|_| "buffer lock poisoned")?.clone();
        let text = String::from_utf8(bytes)?;
        text.lines()
            .map(|line| serde_json::from_str(line).map_err(Into::into))
            .collect()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("buffer lock poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture(run: impl FnOnce()) -> Result<Vec<Json>, Box<dyn Error>> {
    let buffer = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(buffer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, run);
    buffer.json_lines()
}

fn rendered_fields(line: &Json) -> Result<Json, Box<dyn Error>> {
    let encoded = line["fields"]["fields"]
        .as_str()
        .ok_or("missing rendered fields")?;
    Ok(serde_json::from_str(encoded)?)
}

#[test]
fn forwards_level_target_message_and_fields() -> Result<(), Box<dyn Error>> {
    let hooks = HookChain::new()
        .with_fn(|_ctx, _severity, _message| vec![(Box::from("db"), Value::from("orders"))]);
    let logger = BackendSqlLogger::new(TracingBackend::new().with_hooks(hooks));

    let lines = capture(|| {
        let mut fields = LogFields::new();
        fields.insert(Box::from("query"), Value::from("SELECT 1"));
        fields.insert(Box::from("duration"), Value::from(Duration::from_millis(4)));
        fields.insert(Box::from("error"), Value::Error(Box::from("dummy error")));
        logger.log(&LogContext::new(), Level::ERROR, "Query", &fields);
    })?;

    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert_eq!(line["level"], "ERROR");
    assert_eq!(line["target"], TRACING_TARGET);
    assert_eq!(line["fields"]["message"], "Query");
    assert_eq!(
        rendered_fields(line)?,
        json!({
            "query": "SELECT 1",
            "duration": 4.0,
            "error": "dummy error",
            "db": "orders",
        })
    );
    Ok(())
}

#[test]
fn unknown_level_is_emitted_at_debug() -> Result<(), Box<dyn Error>> {
    let logger = BackendSqlLogger::new(TracingBackend::new());

    let lines = capture(|| {
        logger.log(
            &LogContext::new(),
            Level::from_raw(99),
            "Exec",
            &LogFields::new(),
        );
    })?;

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["level"], "DEBUG");
    assert_eq!(rendered_fields(&lines[0])?, json!({}));
    Ok(())
}

#[test]
fn min_level_drops_before_reaching_the_subscriber() -> Result<(), Box<dyn Error>> {
    let logger = BackendSqlLogger::new(TracingBackend::new().with_min_level(Severity::Error));

    let lines = capture(|| {
        logger.info(&LogContext::new(), "Query", &LogFields::new());
        logger.trace(&LogContext::new(), "Query", &LogFields::new());
    })?;

    assert!(lines.is_empty());
    Ok(())
}
