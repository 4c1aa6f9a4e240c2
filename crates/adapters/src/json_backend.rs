//! Structured JSON backend writing one flat object per line.

use crate::event::{Emit, EventSettings, RenderedEvent};
use crate::hooks::HookChain;
use crate::render::{JsonObject, RenderOptions, redact_object};
use sqllog_config::{LoggerConfig, RESERVED_FIELD_NAMES};
use sqllog_ports::{EventBuilder, LogBackend, LogContext, LogSink, Severity};
use serde_json::Value as Json;
use std::fmt;
use std::sync::Arc;

const SERIALIZE_FAILED_LINE: &str =
    "{\"level\":\"error\",\"message\":\"sqllog: event serialization failed\"}\n";

/// JSON backend emitting one line per event.
///
/// Each line is a flat object: base fields, then event and hook fields, then
/// `level` and `message`. Event fields override base fields. An event field
/// named `level` or `message` is kept under `fields.level` or
/// `fields.message`.
///
/// Redaction applies to base fields only; event fields are emitted as
/// supplied.
#[derive(Clone)]
pub struct JsonBackend {
    sink: Arc<dyn LogSink>,
    base_fields: JsonObject,
    settings: EventSettings,
    redact_secrets: bool,
}

impl JsonBackend {
    /// Create a JSON backend writing to `sink`.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            base_fields: JsonObject::new(),
            settings: EventSettings::default(),
            redact_secrets: true,
        }
    }

    /// Create a JSON backend from a validated logger config.
    ///
    /// Hooks are not derived from the config; add them with [`Self::with_hooks`].
    #[must_use]
    pub fn from_config(config: &LoggerConfig, sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            base_fields: config
                .base_fields
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            settings: EventSettings::from_config(config),
            redact_secrets: config.redact_secrets,
        }
    }

    /// Set base fields applied to every event.
    #[must_use]
    pub fn with_base_fields(mut self, fields: JsonObject) -> Self {
        self.base_fields = fields;
        self
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

    /// Enable or disable redaction of secret-looking base fields.
    #[must_use]
    pub const fn with_redaction(mut self, enabled: bool) -> Self {
        self.redact_secrets = enabled;
        self
    }

    /// Current settings.
    #[must_use]
    pub const fn settings(&self) -> &EventSettings {
        &self.settings
    }
}

impl fmt::Debug for JsonBackend {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("JsonBackend")
            .field("base_fields", &self.base_fields.len())
            .field("settings", &self.settings)
            .field("redact_secrets", &self.redact_secrets)
            .finish_non_exhaustive()
    }
}

impl Emit for JsonBackend {
    fn emit(&self, severity: Severity, message: &str, fields: JsonObject) {
        let mut payload = self.base_fields.clone();
        if self.redact_secrets {
            redact_object(&mut payload);
        }
        for (key, value) in fields {
            if RESERVED_FIELD_NAMES.contains(&key.as_str()) {
                payload.insert(format!("fields.{key}"), value);
            } else {
                payload.insert(key, value);
            }
        }
        payload.insert("level".to_string(), Json::from(severity.as_str()));
        payload.insert("message".to_string(), Json::from(message));

        let line = serde_json::to_string(&Json::Object(payload)).map_or_else(
            |_| SERIALIZE_FAILED_LINE.to_string(),
            |mut encoded| {
                encoded.push('\n');
                encoded
            },
        );
        self.sink.write_line(&line);
    }
}

impl LogBackend for JsonBackend {
    fn start_event<'a>(
        &'a self,
        severity: Severity,
        ctx: &'a LogContext,
    ) -> Option<Box<dyn EventBuilder + 'a>> {
        RenderedEvent::start(self, &self.settings, severity, ctx)
    }
}
