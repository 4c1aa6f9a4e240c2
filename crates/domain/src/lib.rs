//! # sqllog-domain
//!
//! The event model shared by the SQL instrumentation side and the logging
//! backends:
//!
//! - **Levels** - `Level` (instrumentation) and `Severity` (backend)
//! - **Values** - `Value`, `LogFields`, well-known field names
//! - **Context** - `LogContext`, `ContextKey`, `CorrelationIdKey`
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - Pure data types with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use sqllog_shared::shared_crate_version;

pub mod context;
pub mod level;
pub mod value;

pub use context::{ContextKey, CorrelationIdKey, LogContext};
pub use level::{Level, ParseSeverityError, Severity};
pub use value::{
    FIELD_ARGS, FIELD_DURATION, FIELD_ERROR, FIELD_QUERY, FIELD_TIME, LogFields, Value,
};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
