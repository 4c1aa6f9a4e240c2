//! Event builder shared by the serializing backends.
//!
//! Setters render into a JSON object; `commit` runs the hook chain and hands
//! the finished object to the backend's [`Emit`] impl. Event fields are never
//! rewritten here.

use crate::fields::attach_field;
use crate::hooks::HookChain;
use crate::render::{JsonObject, RenderOptions};
use sqllog_config::LoggerConfig;
use sqllog_ports::{EventBuilder, LogContext, LogFields, Severity, Value};
use serde_json::Value as Json;
use std::time::{Duration, SystemTime};

/// Settings common to every serializing backend.
#[derive(Debug, Clone)]
pub struct EventSettings {
    /// Events below this severity are not started.
    pub min_level: Severity,
    /// Hooks run at commit.
    pub hooks: HookChain,
    /// Duration and time rendering.
    pub render: RenderOptions,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            min_level: Severity::Trace,
            hooks: HookChain::new(),
            render: RenderOptions::default(),
        }
    }
}

impl EventSettings {
    /// Settings matching a logger config, without hooks.
    #[must_use]
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self {
            min_level: config.min_level,
            hooks: HookChain::new(),
            render: RenderOptions::from_config(config),
        }
    }

    /// Whether an event at `severity` passes the minimum level.
    #[must_use]
    pub const fn enabled(&self, severity: Severity) -> bool {
        severity.is_at_least(self.min_level)
    }
}

/// Final step of a serializing backend.
pub(crate) trait Emit: Send + Sync {
    fn emit(&self, severity: Severity, message: &str, fields: JsonObject);
}

pub(crate) struct RenderedEvent<'a, E: ?Sized> {
    emitter: &'a E,
    settings: &'a EventSettings,
    ctx: &'a LogContext,
    severity: Severity,
    fields: JsonObject,
}

impl<'a, E: Emit + ?Sized + 'a> RenderedEvent<'a, E> {
    pub(crate) fn start(
        emitter: &'a E,
        settings: &'a EventSettings,
        severity: Severity,
        ctx: &'a LogContext,
    ) -> Option<Box<dyn EventBuilder + 'a>> {
        if !settings.enabled(severity) {
            return None;
        }
        Some(Box::new(Self {
            emitter,
            settings,
            ctx,
            severity,
            fields: JsonObject::new(),
        }))
    }

    fn insert(&mut self, key: &str, value: Json) {
        self.fields.insert(key.to_string(), value);
    }
}

impl<E: Emit + ?Sized> EventBuilder for RenderedEvent<'_, E> {
    fn int(&mut self, key: &str, value: i64) {
        self.insert(key, Json::from(value));
    }

    fn uint(&mut self, key: &str, value: u64) {
        self.insert(key, Json::from(value));
    }

    fn float(&mut self, key: &str, value: f64) {
        self.insert(key, Json::from(value));
    }

    fn bool(&mut self, key: &str, value: bool) {
        self.insert(key, Json::Bool(value));
    }

    fn str(&mut self, key: &str, value: &str) {
        self.insert(key, Json::String(value.to_string()));
    }

    fn time(&mut self, key: &str, value: SystemTime) {
        let rendered = self.settings.render.time(value);
        self.insert(key, rendered);
    }

    fn duration(&mut self, key: &str, value: Duration) {
        let rendered = self.settings.render.duration(value);
        self.insert(key, rendered);
    }

    fn array(&mut self, key: &str, values: &[Value]) {
        let rendered = self.settings.render.list(values);
        self.insert(key, rendered);
    }

    fn map(&mut self, key: &str, values: &LogFields) {
        let rendered = self.settings.render.map(values);
        self.insert(key, rendered);
    }

    fn commit(mut self: Box<Self>, message: &str) {
        let settings = self.settings;
        for (key, value) in settings.hooks.run(self.ctx, self.severity, message) {
            attach_field(&mut *self, &key, &value);
        }

        let Self {
            emitter,
            severity,
            fields,
            ..
        } = *self;
        emitter.emit(severity, message, fields);
    }
}
