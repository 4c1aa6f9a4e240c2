//! Backend forwarding SQL events to the `tracing` facade.

use crate::event::{Emit, EventSettings, RenderedEvent};
use crate::hooks::HookChain;
use crate::render::{JsonObject, RenderOptions};
use sqllog_config::LoggerConfig;
use sqllog_ports::{EventBuilder, LogBackend, LogContext, Severity};
use serde_json::Value as Json;

/// Target every forwarded event is emitted under.
pub const TRACING_TARGET: &str = "sqllog";

/// Emits each event through `tracing` at the matching level.
///
/// The rendered field object travels as a single `fields` value so any
/// subscriber can consume it regardless of field-set support.
#[derive(Debug, Clone, Default)]
pub struct TracingBackend {
    settings: EventSettings,
}

impl TracingBackend {
    /// Backend emitting every severity with default rendering.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend configured from a validated logger config.
    #[must_use]
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self {
            settings: EventSettings::from_config(config),
        }
    }

    /// Set the minimum severity.
    #[must_use]
    pub const fn with_min_level(mut self, level: Severity) -> Self {
        self.settings.min_level = level;
        self
    }

    /// Replace the commit-time hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: HookChain) -> Self {
        self.settings.hooks = hooks;
        self
    }

    /// Set duration and time rendering.
    #[must_use]
    pub const fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.settings.render = render;
        self
    }
}

impl Emit for TracingBackend {
    fn emit(&self, severity: Severity, message: &str, fields: JsonObject) {
        let fields = Json::Object(fields);
        match severity {
            Severity::Trace => tracing::trace!(target: TRACING_TARGET, fields = %fields, "{message}"),
            Severity::Debug => tracing::debug!(target: TRACING_TARGET, fields = %fields, "{message}"),
            Severity::Info => tracing::info!(target: TRACING_TARGET, fields = %fields, "{message}"),
            Severity::Warn => tracing::warn!(target: TRACING_TARGET, fields = %fields, "{message}"),
            Severity::Error => tracing::error!(target: TRACING_TARGET, fields = %fields, "{message}"),
        }
    }
}

impl LogBackend for TracingBackend {
    fn start_event<'a>(
        &'a self,
        severity: Severity,
        ctx: &'a LogContext,
    ) -> Option<Box<dyn EventBuilder + 'a>> {
        RenderedEvent::start(self, &self.settings, severity, ctx)
    }
}
