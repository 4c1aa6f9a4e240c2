//! # sqllog-config
//!
//! Logger configuration schema, validation, env overrides, and loaders.
//! This crate depends on `domain` and `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use schema::{
    BackendKind, CURRENT_CONFIG_VERSION, ConfigSchemaError, DurationUnit, LoggerConfig,
    RESERVED_FIELD_NAMES, SinkConfig, SinkKind, TimeFormat, ValidatedLoggerConfig,
    parse_logger_config_json, parse_logger_config_toml,
};

pub use env::{
    ENV_BACKEND, ENV_CORRELATION_FIELD, ENV_DURATION_UNIT, ENV_FILE, ENV_LEVEL, ENV_REDACT,
    ENV_SINK, ENV_TIME_FORMAT, EnvParseError, LoggerEnv, apply_env_overrides,
};
pub use load::{
    load_logger_config_from_path, load_logger_config_from_sources, load_logger_config_std_env,
    to_pretty_json, to_pretty_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
