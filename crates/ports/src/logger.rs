//! Inbound SQL logging boundary contract.

use sqllog_domain::{Level, LogContext, LogFields};
use std::sync::Arc;

/// Boundary contract called by the SQL instrumentation layer.
///
/// Implementations never fail the caller: logging is fire-and-forget.
pub trait SqlLogger: Send + Sync {
    /// Emit one event for a driver call.
    ///
    /// `level` and `message` name the event itself; backends that emit flat
    /// objects keep a field with either name under a `fields.` prefix.
    fn log(&self, ctx: &LogContext, level: Level, message: &str, fields: &LogFields);

    /// Convenience: trace event.
    fn trace(&self, ctx: &LogContext, message: &str, fields: &LogFields) {
        self.log(ctx, Level::TRACE, message, fields);
    }

    /// Convenience: debug event.
    fn debug(&self, ctx: &LogContext, message: &str, fields: &LogFields) {
        self.log(ctx, Level::DEBUG, message, fields);
    }

    /// Convenience: info event.
    fn info(&self, ctx: &LogContext, message: &str, fields: &LogFields) {
        self.log(ctx, Level::INFO, message, fields);
    }

    /// Convenience: error event.
    fn error(&self, ctx: &LogContext, message: &str, fields: &LogFields) {
        self.log(ctx, Level::ERROR, message, fields);
    }
}

impl<T: SqlLogger + ?Sized> SqlLogger for Arc<T> {
    fn log(&self, ctx: &LogContext, level: Level, message: &str, fields: &LogFields) {
        (**self).log(ctx, level, message, fields);
    }
}
