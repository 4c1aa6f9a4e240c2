//! # sqllog-adapters
//!
//! The SQL logger adapter and the backends it can drive.
//!
//! - [`BackendSqlLogger`] maps levels and dispatches fields to any
//!   [`LogBackend`](sqllog_ports::LogBackend).
//! - [`JsonBackend`] writes one JSON object per line to a
//!   [`LogSink`](sqllog_ports::LogSink).
//! - [`TracingBackend`] forwards events to the `tracing` facade.
//! - [`HookChain`] and [`ContextValueHook`] enrich events from the call's
//!   context at commit time.
//!
//! This crate depends on `ports`, `config`, `domain`, and `shared`.

pub mod event;
pub mod fields;
pub mod hooks;
pub mod json_backend;
pub mod log_sink;
pub mod render;
pub mod sql_logger;
pub mod tracing_backend;

pub use event::EventSettings;
pub use fields::{attach_field, attach_fields};
pub use hooks::{ContextValueHook, HookChain, correlation_id_hook};
pub use json_backend::JsonBackend;
pub use log_sink::{StderrLogSink, StdoutLogSink, WriterLogSink, file_sink};
pub use render::{JsonObject, RenderOptions, duration_in_unit, time_in_format};
pub use sql_logger::{BackendSqlLogger, map_level};
pub use tracing_backend::{TRACING_TARGET, TracingBackend};

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
