//! Backend capability contract.
//!
//! Any structured-logging backend that can start an event at a severity,
//! accept typed fields, and commit can sit behind the SQL logger. Backends
//! that support enrichment run their [`EventHook`]s inside
//! [`EventBuilder::commit`], with access to the call's [`LogContext`].

use sqllog_domain::{LogContext, LogFields, Severity, Value};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// A field produced by a hook.
pub type HookField = (Box<str>, Value);

/// Incrementally built event. Consumed by [`EventBuilder::commit`], so an
/// event is emitted at most once.
pub trait EventBuilder {
    /// Attach a signed integer.
    fn int(&mut self, key: &str, value: i64);

    /// Attach an unsigned integer.
    fn uint(&mut self, key: &str, value: u64);

    /// Attach a float.
    fn float(&mut self, key: &str, value: f64);

    /// Attach a boolean.
    fn bool(&mut self, key: &str, value: bool);

    /// Attach a string.
    fn str(&mut self, key: &str, value: &str);

    /// Attach an absolute time.
    fn time(&mut self, key: &str, value: SystemTime);

    /// Attach an elapsed amount.
    fn duration(&mut self, key: &str, value: Duration);

    /// Attach an ordered sequence.
    fn array(&mut self, key: &str, values: &[Value]);

    /// Attach a nested object.
    fn map(&mut self, key: &str, values: &LogFields);

    /// Run registered hooks and flush the event to the backend's sink.
    fn commit(self: Box<Self>, message: &str);
}

/// A structured-logging backend.
pub trait LogBackend: Send + Sync {
    /// Start an event at `severity`.
    ///
    /// Returns `None` when the backend is configured to drop events at this
    /// severity. `ctx` stays borrowed by the builder so hooks can read it at
    /// commit time.
    fn start_event<'a>(
        &'a self,
        severity: Severity,
        ctx: &'a LogContext,
    ) -> Option<Box<dyn EventBuilder + 'a>>;
}

impl<B: LogBackend + ?Sized> LogBackend for Arc<B> {
    fn start_event<'a>(
        &'a self,
        severity: Severity,
        ctx: &'a LogContext,
    ) -> Option<Box<dyn EventBuilder + 'a>> {
        (**self).start_event(severity, ctx)
    }
}

impl<B: LogBackend + ?Sized> LogBackend for Box<B> {
    fn start_event<'a>(
        &'a self,
        severity: Severity,
        ctx: &'a LogContext,
    ) -> Option<Box<dyn EventBuilder + 'a>> {
        (**self).start_event(severity, ctx)
    }
}

/// Enrichment callback invoked once per commit.
pub trait EventHook: Send + Sync {
    /// Fields to append to the event being committed.
    fn run(&self, ctx: &LogContext, severity: Severity, message: &str) -> Vec<HookField>;
}

impl<F> EventHook for F
where
    F: Fn(&LogContext, Severity, &str) -> Vec<HookField> + Send + Sync,
{
    fn run(&self, ctx: &LogContext, severity: Severity, message: &str) -> Vec<HookField> {
        self(ctx, severity, message)
    }
}
