//! Rendering of field values into JSON.
//!
//! Shared by every backend that serializes events: durations become floats in
//! the configured unit, absolute times become signed integers since the unix
//! epoch, and non-finite floats become `null`.

use sqllog_config::{DurationUnit, LoggerConfig, TimeFormat};
use sqllog_ports::{LogFields, Value};
use sqllog_shared::{REDACTED, is_secret_key};
use serde_json::{Map, Value as Json};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// JSON object holding rendered fields.
pub type JsonObject = Map<String, Json>;

/// How durations and times are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Unit for `Duration` values.
    pub duration_unit: DurationUnit,
    /// Encoding for `Time` values.
    pub time_format: TimeFormat,
}

impl RenderOptions {
    /// Options matching a logger config.
    #[must_use]
    pub const fn from_config(config: &LoggerConfig) -> Self {
        Self {
            duration_unit: config.duration_unit,
            time_format: config.time_format,
        }
    }

    /// Render a field value.
    #[must_use]
    pub fn value(&self, value: &Value) -> Json {
        match value {
            Value::Null => Json::Null,
            Value::Bool(value) => Json::Bool(*value),
            Value::Int(value) => Json::from(*value),
            Value::UInt(value) => Json::from(*value),
            Value::Float(value) => Json::from(*value),
            Value::Str(value) | Value::Error(value) => Json::String(value.to_string()),
            Value::Time(value) => self.time(*value),
            Value::Duration(value) => self.duration(*value),
            Value::List(values) => self.list(values),
            Value::Map(values) => self.map(values),
        }
    }

    /// Render a nested object.
    #[must_use]
    pub fn map(&self, values: &LogFields) -> Json {
        Json::Object(
            values
                .iter()
                .map(|(key, value)| (key.to_string(), self.value(value)))
                .collect(),
        )
    }

    /// Render a sequence, keeping its order.
    #[must_use]
    pub fn list(&self, values: &[Value]) -> Json {
        Json::Array(values.iter().map(|value| self.value(value)).collect())
    }

    /// Render an elapsed amount as a float in the configured unit.
    #[must_use]
    pub fn duration(&self, value: Duration) -> Json {
        Json::from(duration_in_unit(value, self.duration_unit))
    }

    /// Render an absolute time as signed integer units since the unix epoch.
    #[must_use]
    pub fn time(&self, value: SystemTime) -> Json {
        Json::from(time_in_format(value, self.time_format))
    }
}

/// Elapsed amount in `unit`, keeping sub-unit precision.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    reason = "durations beyond 2^53 seconds are not meaningful for query timing"
)]
pub fn duration_in_unit(value: Duration, unit: DurationUnit) -> f64 {
    let secs = value.as_secs() as f64;
    let nanos = f64::from(value.subsec_nanos());
    match unit {
        DurationUnit::Nanoseconds => secs.mul_add(1e9, nanos),
        DurationUnit::Microseconds => secs.mul_add(1e6, nanos / 1e3),
        DurationUnit::Milliseconds => secs.mul_add(1e3, nanos / 1e6),
        DurationUnit::Seconds => secs + nanos / 1e9,
    }
}

/// Signed offset from the unix epoch in `format` units, saturating at the
/// `i64` range.
#[must_use]
pub fn time_in_format(value: SystemTime, format: TimeFormat) -> i64 {
    let (offset, negative) = match value.duration_since(UNIX_EPOCH) {
        Ok(offset) => (offset, false),
        Err(error) => (error.duration(), true),
    };
    let units = match format {
        TimeFormat::Unix => u128::from(offset.as_secs()),
        TimeFormat::UnixMs => offset.as_millis(),
        TimeFormat::UnixNano => offset.as_nanos(),
    };
    let magnitude = i64::try_from(units).unwrap_or(i64::MAX);
    if negative { -magnitude } else { magnitude }
}

/// Replace values under secret-looking keys, recursing into nested values.
pub fn redact_object(object: &mut JsonObject) {
    for (key, value) in object.iter_mut() {
        if is_secret_key(key) {
            *value = Json::String(REDACTED.to_string());
        } else {
            redact_value(value);
        }
    }
}

fn redact_value(value: &mut Json) {
    match value {
        Json::Object(map) => redact_object(map),
        Json::Array(items) => {
            for item in items {
                redact_value(item);
            }
        },
        _ => {},
    }
}
