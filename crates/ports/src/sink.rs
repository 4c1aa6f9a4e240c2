//! Line-oriented output contract for serializing backends.

use std::sync::Arc;

/// A sink that receives pre-formatted log lines.
///
/// Each call carries one complete event, newline included. Implementations
/// report their own I/O failures and never return them to the caller.
pub trait LogSink: Send + Sync {
    /// Write a line to the sink.
    fn write_line(&self, line: &str);
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn write_line(&self, line: &str) {
        (**self).write_line(line);
    }
}
