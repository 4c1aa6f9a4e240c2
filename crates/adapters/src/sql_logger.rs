//! The SQL logger adapter: generic driver events in, backend events out.

use crate::fields::attach_fields;
use sqllog_ports::{Level, LogBackend, LogContext, LogFields, Severity, SqlLogger};

/// Map an instrumentation level to a backend severity.
///
/// Total: levels outside the four known constants map to `Debug`.
#[must_use]
pub const fn map_level(level: Level) -> Severity {
    match level {
        Level::ERROR => Severity::Error,
        Level::INFO => Severity::Info,
        Level::DEBUG => Severity::Debug,
        Level::TRACE => Severity::Trace,
        _ => Severity::Debug,
    }
}

/// [`SqlLogger`] that forwards every call to a single backend.
#[derive(Debug, Clone)]
pub struct BackendSqlLogger<B> {
    backend: B,
}

impl<B: LogBackend> BackendSqlLogger<B> {
    /// Wrap a backend.
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Borrow the wrapped backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Unwrap the backend.
    pub fn into_inner(self) -> B {
        self.backend
    }
}

impl<B: LogBackend> SqlLogger for BackendSqlLogger<B> {
    fn log(&self, ctx: &LogContext, level: Level, message: &str, fields: &LogFields) {
        let Some(mut event) = self.backend.start_event(map_level(level), ctx) else {
            return;
        };
        attach_fields(&mut *event, fields);
        event.commit(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn known_levels_map_to_their_severity() {
        assert_eq!(map_level(Level::ERROR), Severity::Error);
        assert_eq!(map_level(Level::INFO), Severity::Info);
        assert_eq!(map_level(Level::DEBUG), Severity::Debug);
        assert_eq!(map_level(Level::TRACE), Severity::Trace);
    }

    #[test]
    fn level_99_maps_to_debug() {
        assert_eq!(map_level(Level::from_raw(99)), Severity::Debug);
    }

    proptest! {
        #[test]
        fn mapping_is_total_and_never_warn(raw in any::<i32>()) {
            let level = Level::from_raw(raw);
            let severity = map_level(level);
            prop_assert_ne!(severity, Severity::Warn);
            if !level.is_known() {
                prop_assert_eq!(severity, Severity::Debug);
            }
        }
    }
}
