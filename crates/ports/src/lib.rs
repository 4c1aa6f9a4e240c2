//! # sqllog-ports
//!
//! Port traits for the sqllog hexagonal architecture.
//!
//! - [`SqlLogger`]: what the SQL instrumentation layer calls.
//! - [`LogBackend`], [`EventBuilder`], [`EventHook`]: what a structured-logging
//!   backend must provide.
//! - [`LogSink`]: where serializing backends write their lines.
//!
//! This crate depends only on `domain` and `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod backend;
pub mod logger;
pub mod sink;

pub use backend::*;
pub use logger::*;
pub use sink::*;

// Re-export the domain types used in port signatures, so adapter crates can
// implement ports without directly depending on `sqllog-domain`.
pub use sqllog_domain::{
    ContextKey, CorrelationIdKey, FIELD_ARGS, FIELD_DURATION, FIELD_ERROR, FIELD_QUERY,
    FIELD_TIME, Level, LogContext, LogFields, Severity, Value,
};

#[cfg(test)]
mod tests {
    use super::*;
    use sqllog_domain::domain_crate_version;
    use sqllog_shared::shared_crate_version;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn workspace_deps() -> Vec<String> {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let mut deps = Vec::new();
        let mut in_deps = false;
        let mut in_dev_deps = false;

        for raw_line in cargo_toml.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                in_deps = line == "[dependencies]";
                in_dev_deps = line == "[dev-dependencies]";
                continue;
            }
            if !(in_deps || in_dev_deps) {
                continue;
            }
            if line.starts_with("sqllog-") {
                let key = line.split('=').next().unwrap_or("").trim();
                let name = key.split('.').next().unwrap_or("").trim();
                deps.push(name.to_string());
            }
        }

        deps
    }

    #[test]
    fn ports_depends_only_on_domain_and_shared() {
        let deps = workspace_deps();
        let allowed = ["sqllog-domain", "sqllog-shared"];

        for dep in &deps {
            assert!(
                allowed.contains(&dep.as_str()),
                "unexpected dependency found: {dep}"
            );
        }

        for expected in allowed {
            assert!(
                deps.iter().any(|dep| dep == expected),
                "missing dependency: {expected}"
            );
        }
    }

    #[test]
    fn ports_can_use_domain_and_shared() {
        assert!(!ports_crate_version().is_empty());
        assert!(!domain_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }

    #[derive(Default)]
    struct CountingLogger {
        calls: AtomicUsize,
        last_level: std::sync::Mutex<Option<Level>>,
    }

    impl SqlLogger for CountingLogger {
        fn log(&self, _ctx: &LogContext, level: Level, _message: &str, _fields: &LogFields) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut guard) = self.last_level.lock() {
                *guard = Some(level);
            }
        }
    }

    #[test]
    fn convenience_methods_forward_their_level() {
        let logger = Arc::new(CountingLogger::default());
        let ctx = LogContext::new();
        let fields = LogFields::new();

        logger.error(&ctx, "query", &fields);
        assert_eq!(*logger.last_level.lock().unwrap(), Some(Level::ERROR));
        logger.trace(&ctx, "query", &fields);
        assert_eq!(*logger.last_level.lock().unwrap(), Some(Level::TRACE));
        assert_eq!(logger.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn closures_are_hooks() {
        fn run_hook(hook: &dyn EventHook, ctx: &LogContext) -> Vec<HookField> {
            hook.run(ctx, Severity::Info, "query")
        }

        let hook = |_ctx: &LogContext, severity: Severity, _message: &str| -> Vec<HookField> {
            vec![(Box::from("severity"), Value::from(severity.as_str()))]
        };
        let fields = run_hook(&hook, &LogContext::new());
        assert_eq!(fields, vec![(Box::from("severity"), Value::from("info"))]);
    }
}
