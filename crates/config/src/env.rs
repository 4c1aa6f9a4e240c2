//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict: a variable that is present but empty or
//! unrecognized fails fast instead of being ignored. Values of secret-looking
//! variables never appear in error metadata.

use crate::schema::{
    BackendKind, DurationUnit, LoggerConfig, SinkKind, TimeFormat, ValidatedLoggerConfig,
};
use sqllog_domain::Severity;
use sqllog_shared::{ErrorCode, ErrorEnvelope, redact_if_secret};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Env var: backend kind (`json` or `tracing`).
pub const ENV_BACKEND: &str = "SQLLOG_BACKEND";
/// Env var: minimum severity.
pub const ENV_LEVEL: &str = "SQLLOG_LEVEL";
/// Env var: duration rendering unit.
pub const ENV_DURATION_UNIT: &str = "SQLLOG_DURATION_UNIT";
/// Env var: time rendering format.
pub const ENV_TIME_FORMAT: &str = "SQLLOG_TIME_FORMAT";
/// Env var: sink kind.
pub const ENV_SINK: &str = "SQLLOG_SINK";
/// Env var: file sink path (implies `SQLLOG_SINK=file` when the sink is unset).
pub const ENV_FILE: &str = "SQLLOG_FILE";
/// Env var: secret redaction toggle.
pub const ENV_REDACT: &str = "SQLLOG_REDACT";
/// Env var: correlation id field name.
pub const ENV_CORRELATION_FIELD: &str = "SQLLOG_CORRELATION_FIELD";

const ALL_VARS: [&str; 8] = [
    ENV_BACKEND,
    ENV_LEVEL,
    ENV_DURATION_UNIT,
    ENV_TIME_FORMAT,
    ENV_SINK,
    ENV_FILE,
    ENV_REDACT,
    ENV_CORRELATION_FIELD,
];

/// Parsed env overrides. `None` means the variable was not set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerEnv {
    /// Backend override.
    pub backend: Option<BackendKind>,
    /// Minimum severity override.
    pub min_level: Option<Severity>,
    /// Duration unit override.
    pub duration_unit: Option<DurationUnit>,
    /// Time format override.
    pub time_format: Option<TimeFormat>,
    /// Sink kind override.
    pub sink: Option<SinkKind>,
    /// File sink path override.
    pub file: Option<PathBuf>,
    /// Redaction override.
    pub redact_secrets: Option<bool>,
    /// Correlation id field override.
    pub correlation_id_field: Option<String>,
}

impl LoggerEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            backend: parse_optional_enum(map, ENV_BACKEND, BackendKind::parse)?,
            min_level: parse_optional_enum(map, ENV_LEVEL, |value| value.parse().ok())?,
            duration_unit: parse_optional_enum(map, ENV_DURATION_UNIT, DurationUnit::parse)?,
            time_format: parse_optional_enum(map, ENV_TIME_FORMAT, TimeFormat::parse)?,
            sink: parse_optional_enum(map, ENV_SINK, SinkKind::parse)?,
            file: parse_optional_trimmed_string(map, ENV_FILE)?.map(PathBuf::from),
            redact_secrets: parse_optional_bool(map, ENV_REDACT)?,
            correlation_id_field: parse_optional_trimmed_string(map, ENV_CORRELATION_FIELD)?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in ALL_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }

        Self::from_map(&map)
    }

    /// Returns `true` when no variable was set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Apply env overrides to a base config (env wins over file/default values),
/// then validate the merged result.
pub fn apply_env_overrides(
    base: LoggerConfig,
    env: &LoggerEnv,
) -> Result<ValidatedLoggerConfig, ErrorEnvelope> {
    let mut config = base;

    set_copy(&mut config.backend, env.backend);
    set_copy(&mut config.min_level, env.min_level);
    set_copy(&mut config.duration_unit, env.duration_unit);
    set_copy(&mut config.time_format, env.time_format);
    set_copy(&mut config.redact_secrets, env.redact_secrets);
    apply_sink_overrides(&mut config, env);
    if let Some(field) = &env.correlation_id_field {
        config.correlation_id_field = Some(field.clone());
    }

    config.validate_and_normalize().map_err(Into::into)
}

fn apply_sink_overrides(config: &mut LoggerConfig, env: &LoggerEnv) {
    match (env.sink, &env.file) {
        (None, None) => {},
        (Some(kind), None) => {
            config.sink.kind = kind;
            if kind != SinkKind::File {
                config.sink.path = None;
            }
        },
        (kind, Some(path)) => {
            config.sink.kind = kind.unwrap_or(SinkKind::File);
            config.sink.path = Some(path.clone());
        },
    }
}

const fn set_copy<T: Copy>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::config("empty_env_var"),
            Self::InvalidBool { .. } => ErrorCode::config("invalid_env_bool"),
            Self::InvalidEnum { .. } => ErrorCode::config("invalid_env_enum"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidBool { var, .. } => write!(formatter, "{var} must be a boolean"),
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let mut envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => {
                envelope = envelope.with_metadata("env_var", var);
            },
            EnvParseError::InvalidBool { var, value } | EnvParseError::InvalidEnum { var, value } => {
                let value = redact_if_secret(var, &value);
                envelope = envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", value);
            },
        }

        envelope
    }
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<String>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    Ok(Some(trimmed.to_string()))
}

fn parse_optional_enum<T>(
    map: &BTreeMap<String, String>,
    var: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, EnvParseError> {
    let Some(trimmed) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };
    parse(&trimmed)
        .map(Some)
        .ok_or_else(|| EnvParseError::InvalidEnum {
            var,
            value: trimmed,
        })
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: raw.clone(),
        }),
    }
}
