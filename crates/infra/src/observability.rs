//! Composition root: builds a ready-to-use SQL logger from configuration.

use crate::InfraResult;
use sqllog_adapters::{
    BackendSqlLogger, HookChain, JsonBackend, StderrLogSink, StdoutLogSink, TracingBackend,
    correlation_id_hook, file_sink,
};
use sqllog_config::{
    BackendKind, SinkKind, ValidatedLoggerConfig, load_logger_config_std_env,
};
use sqllog_ports::{LogBackend, LogContext, LogSink, SqlLogger};
use sqllog_shared::{CorrelationId, ErrorClass, ErrorCode, ErrorEnvelope};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Hooks implied by the config, followed by `extra`.
#[must_use]
pub fn config_hooks(config: &ValidatedLoggerConfig, extra: HookChain) -> HookChain {
    let hooks = match &config.correlation_id_field {
        Some(field) => HookChain::new().with(correlation_id_hook(field.as_str())),
        None => HookChain::new(),
    };
    hooks.chain(extra)
}

/// `ctx` if it already carries a correlation id, otherwise a derived context
/// with a fresh request id.
#[must_use]
pub fn ensure_correlation_id(ctx: &LogContext) -> LogContext {
    if ctx.correlation_id().is_some() {
        ctx.clone()
    } else {
        ctx.with_correlation_id(CorrelationId::new_request_id())
    }
}

/// Open the sink named by the config.
pub fn sink_from_config(config: &ValidatedLoggerConfig) -> InfraResult<Arc<dyn LogSink>> {
    match (config.sink.kind, &config.sink.path) {
        (SinkKind::Stderr, _) => Ok(Arc::new(StderrLogSink)),
        (SinkKind::Stdout, _) => Ok(Arc::new(StdoutLogSink)),
        (SinkKind::File, Some(path)) => Ok(Arc::new(file_sink(path)?)),
        (SinkKind::File, None) => Err(ErrorEnvelope::invariant(
            ErrorCode::config("invalid_sink"),
            "validated file sink without a path",
        )),
    }
}

/// Build the configured backend, writing JSON lines to `sink`.
///
/// `sink` is unused by the tracing backend.
#[must_use]
pub fn backend_with_sink(
    config: &ValidatedLoggerConfig,
    sink: Arc<dyn LogSink>,
    hooks: HookChain,
) -> Arc<dyn LogBackend> {
    let hooks = config_hooks(config, hooks);
    match config.backend {
        BackendKind::Json => Arc::new(JsonBackend::from_config(config, sink).with_hooks(hooks)),
        BackendKind::Tracing => Arc::new(TracingBackend::from_config(config).with_hooks(hooks)),
    }
}

/// SQL logger over the configured backend, writing JSON lines to `sink`.
#[must_use]
pub fn sql_logger_with_sink(
    config: &ValidatedLoggerConfig,
    sink: Arc<dyn LogSink>,
    hooks: HookChain,
) -> Arc<dyn SqlLogger> {
    Arc::new(BackendSqlLogger::new(backend_with_sink(config, sink, hooks)))
}

/// SQL logger over the configured backend and sink.
pub fn sql_logger_from_config(
    config: &ValidatedLoggerConfig,
    hooks: HookChain,
) -> InfraResult<Arc<dyn SqlLogger>> {
    let sink: Arc<dyn LogSink> = match config.backend {
        BackendKind::Json => sink_from_config(config)?,
        BackendKind::Tracing => Arc::new(StderrLogSink),
    };
    Ok(sql_logger_with_sink(config, sink, hooks))
}

/// SQL logger configured from an optional file and the process environment.
pub fn sql_logger_from_env(
    config_path: Option<&Path>,
    hooks: HookChain,
) -> InfraResult<Arc<dyn SqlLogger>> {
    let config = load_logger_config_std_env(config_path)?;
    sql_logger_from_config(&config, hooks)
}

/// Install a global JSON `tracing` subscriber filtered by `filter`
/// (e.g. `"sqllog=debug"`), for use with the tracing backend.
pub fn install_tracing_subscriber(filter: &str) -> InfraResult<()> {
    let filter = EnvFilter::try_new(filter).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::config("invalid_filter"),
            format!("invalid tracing filter: {error}"),
        )
    })?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .try_init()
        .map_err(|error| {
            ErrorEnvelope::unexpected(
                ErrorCode::infra("subscriber_already_set"),
                format!("failed to install tracing subscriber: {error}"),
                ErrorClass::NonRetriable,
            )
        })
}
