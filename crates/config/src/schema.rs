//! Logger configuration schema, defaults, validation, and normalization.
//!
//! - Deserialization uses `serde` (JSON or TOML).
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.
//! - Normalization trims field names so equal configs compare equal.

use sqllog_domain::Severity;
use sqllog_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

const FIELD_NAME_MAX_LEN: usize = 128;
const BASE_FIELDS_MAX: usize = 64;

/// Field names the backends always write themselves.
pub const RESERVED_FIELD_NAMES: [&str; 2] = ["level", "message"];

/// Which backend receives SQL events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One JSON object per line written to the configured sink.
    #[default]
    Json,
    /// Events forwarded to the `tracing` facade.
    Tracing,
}

impl BackendKind {
    /// Stable config label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Tracing => "tracing",
        }
    }

    /// Parse a config label (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "tracing" => Some(Self::Tracing),
            _ => None,
        }
    }
}

/// Unit used to render `duration` fields. Rendered as a float, so sub-unit
/// precision is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DurationUnit {
    /// Nanoseconds.
    #[serde(rename = "ns")]
    Nanoseconds,
    /// Microseconds.
    #[serde(rename = "us")]
    Microseconds,
    /// Milliseconds.
    #[default]
    #[serde(rename = "ms")]
    Milliseconds,
    /// Seconds.
    #[serde(rename = "s")]
    Seconds,
}

impl DurationUnit {
    /// Stable config label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Microseconds => "us",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
        }
    }

    /// Parse a config label.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ns" | "nanoseconds" => Some(Self::Nanoseconds),
            "us" | "microseconds" => Some(Self::Microseconds),
            "ms" | "milliseconds" => Some(Self::Milliseconds),
            "s" | "seconds" => Some(Self::Seconds),
            _ => None,
        }
    }
}

/// How absolute times are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    /// Integer unix seconds.
    #[default]
    #[serde(rename = "unix")]
    Unix,
    /// Integer unix milliseconds.
    #[serde(rename = "unixMs")]
    UnixMs,
    /// Integer unix nanoseconds.
    #[serde(rename = "unixNano")]
    UnixNano,
}

impl TimeFormat {
    /// Stable config label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unix => "unix",
            Self::UnixMs => "unixMs",
            Self::UnixNano => "unixNano",
        }
    }

    /// Parse a config label (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "unix" => Some(Self::Unix),
            "unixms" => Some(Self::UnixMs),
            "unixnano" => Some(Self::UnixNano),
            _ => None,
        }
    }
}

/// Where JSON lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Standard error.
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
    /// Append to a file (`sink.path`).
    File,
}

impl SinkKind {
    /// Stable config label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stderr => "stderr",
            Self::Stdout => "stdout",
            Self::File => "file",
        }
    }

    /// Parse a config label (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stderr" => Some(Self::Stderr),
            "stdout" => Some(Self::Stdout),
            "file" => Some(Self::File),
            _ => None,
        }
    }
}

/// Sink settings for the JSON backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct SinkConfig {
    /// Sink kind.
    pub kind: SinkKind,
    /// File path, required when `kind` is `file`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Top-level logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggerConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Backend receiving events.
    pub backend: BackendKind,
    /// Events below this severity are dropped by the backend.
    pub min_level: Severity,
    /// Rendering unit for `duration` fields.
    pub duration_unit: DurationUnit,
    /// Rendering of absolute times.
    pub time_format: TimeFormat,
    /// Output sink (JSON backend only).
    pub sink: SinkConfig,
    /// Replace values of secret-looking base fields.
    pub redact_secrets: bool,
    /// Fields added to every event.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub base_fields: BTreeMap<String, serde_json::Value>,
    /// When set, the request correlation id is written under this name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id_field: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            backend: BackendKind::default(),
            min_level: Severity::Trace,
            duration_unit: DurationUnit::default(),
            time_format: TimeFormat::default(),
            sink: SinkConfig::default(),
            redact_secrets: true,
            base_fields: BTreeMap::new(),
            correlation_id_field: None,
        }
    }
}

impl LoggerConfig {
    /// Validate and normalize the config.
    pub fn validate_and_normalize(mut self) -> Result<ValidatedLoggerConfig, ConfigSchemaError> {
        self.validate_version()?;
        self.normalize();
        self.validate_sink()?;
        self.validate_field_names()?;
        Ok(ValidatedLoggerConfig { raw: self })
    }

    const fn validate_version(&self) -> Result<(), ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        Ok(())
    }

    fn normalize(&mut self) {
        self.correlation_id_field = self
            .correlation_id_field
            .take()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        self.base_fields = std::mem::take(&mut self.base_fields)
            .into_iter()
            .map(|(key, value)| (key.trim().to_string(), value))
            .collect();
    }

    fn validate_sink(&self) -> Result<(), ConfigSchemaError> {
        let has_path = self
            .sink
            .path
            .as_ref()
            .is_some_and(|path| !path.as_os_str().is_empty());
        match self.sink.kind {
            SinkKind::File if !has_path => Err(ConfigSchemaError::MissingSinkPath),
            SinkKind::Stderr | SinkKind::Stdout if self.sink.path.is_some() => {
                Err(ConfigSchemaError::UnexpectedSinkPath {
                    kind: self.sink.kind.as_str(),
                })
            },
            _ => Ok(()),
        }
    }

    fn validate_field_names(&self) -> Result<(), ConfigSchemaError> {
        if self.base_fields.len() > BASE_FIELDS_MAX {
            return Err(ConfigSchemaError::TooManyBaseFields {
                len: self.base_fields.len(),
                max: BASE_FIELDS_MAX,
            });
        }
        for name in self.base_fields.keys() {
            validate_field_name("baseFields", name)?;
        }
        if let Some(name) = &self.correlation_id_field {
            validate_field_name("correlationIdField", name)?;
        }
        Ok(())
    }
}

fn validate_field_name(field: &'static str, name: &str) -> Result<(), ConfigSchemaError> {
    let reason = if name.is_empty() {
        Some("must be non-empty")
    } else if name.len() > FIELD_NAME_MAX_LEN {
        Some("is too long")
    } else if name.chars().any(char::is_control) {
        Some("contains control characters")
    } else if RESERVED_FIELD_NAMES.contains(&name) {
        Some("is reserved")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ConfigSchemaError::InvalidFieldName {
            field,
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Validated config wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLoggerConfig {
    raw: LoggerConfig,
}

impl ValidatedLoggerConfig {
    /// Borrow the raw config.
    #[must_use]
    pub const fn as_ref(&self) -> &LoggerConfig {
        &self.raw
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> LoggerConfig {
        self.raw
    }
}

impl AsRef<LoggerConfig> for ValidatedLoggerConfig {
    fn as_ref(&self) -> &LoggerConfig {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedLoggerConfig {
    type Target = LoggerConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Parse a logger config from a JSON string, applying validation and normalization.
pub fn parse_logger_config_json(input: &str) -> Result<ValidatedLoggerConfig, ErrorEnvelope> {
    let config: LoggerConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::config("invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a logger config from a TOML string, applying validation and normalization.
pub fn parse_logger_config_toml(input: &str) -> Result<ValidatedLoggerConfig, ErrorEnvelope> {
    let config: LoggerConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::config("invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Typed validation errors for the configuration schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this binary.
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// `sink.kind = file` without a path.
    MissingSinkPath,
    /// A path was given for a sink that does not use one.
    UnexpectedSinkPath {
        /// Sink kind label.
        kind: &'static str,
    },
    /// Too many base fields.
    TooManyBaseFields {
        /// Number of entries.
        len: usize,
        /// Maximum allowed number of entries.
        max: usize,
    },
    /// A configured field name cannot be used.
    InvalidFieldName {
        /// Config field holding the name.
        field: &'static str,
        /// Offending name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::config("unsupported_version"),
            Self::MissingSinkPath | Self::UnexpectedSinkPath { .. } => {
                ErrorCode::config("invalid_sink")
            },
            Self::TooManyBaseFields { .. } => ErrorCode::config("list_too_large"),
            Self::InvalidFieldName { .. } => ErrorCode::config("invalid_field_name"),
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => write!(
                formatter,
                "unsupported config version {found} (supported: {supported})"
            ),
            Self::MissingSinkPath => formatter.write_str("sink.path is required when sink.kind is file"),
            Self::UnexpectedSinkPath { kind } => {
                write!(formatter, "sink.path is not used by the {kind} sink")
            },
            Self::TooManyBaseFields { len, max } => {
                write!(formatter, "baseFields is too large ({len} entries, max {max})")
            },
            Self::InvalidFieldName {
                field,
                name,
                reason,
            } => write!(formatter, "{field} name `{name}` {reason}"),
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let mut envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => {
                envelope = envelope
                    .with_metadata("found", found.to_string())
                    .with_metadata("supported", supported.to_string());
            },
            ConfigSchemaError::MissingSinkPath => {
                envelope = envelope.with_metadata("field", "sink.path");
            },
            ConfigSchemaError::UnexpectedSinkPath { kind } => {
                envelope = envelope
                    .with_metadata("field", "sink.path")
                    .with_metadata("kind", kind);
            },
            ConfigSchemaError::TooManyBaseFields { len, max } => {
                envelope = envelope
                    .with_metadata("field", "baseFields")
                    .with_metadata("len", len.to_string())
                    .with_metadata("max", max.to_string());
            },
            ConfigSchemaError::InvalidFieldName { field, name, .. } => {
                envelope = envelope
                    .with_metadata("field", field)
                    .with_metadata("name", name);
            },
        }

        envelope
    }
}
