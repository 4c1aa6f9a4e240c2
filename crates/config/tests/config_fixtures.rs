//! Integration tests for parsing config fixtures from the workspace testkit.

use sqllog_config::{
    BackendKind, CURRENT_CONFIG_VERSION, DurationUnit, LoggerEnv, SinkKind, TimeFormat,
    load_logger_config_from_path, parse_logger_config_json, parse_logger_config_toml,
};
use sqllog_domain::Severity;
use sqllog_shared::ErrorCode;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn fixture_path(relative: &str) -> PathBuf {
    workspace_root()
        .join("crates")
        .join("testkit")
        .join("fixtures")
        .join(relative)
}

fn read_fixture(relative: &str) -> Result<String, Box<dyn Error>> {
    Ok(fs::read_to_string(fixture_path(relative))?)
}

#[test]
fn parses_valid_fixture_and_normalizes() -> Result<(), Box<dyn Error>> {
    let contents = read_fixture("config/logger-config.valid.json")?;
    let config = parse_logger_config_json(&contents)?;

    assert_eq!(config.version, CURRENT_CONFIG_VERSION);
    assert_eq!(config.backend, BackendKind::Json);
    assert_eq!(config.min_level, Severity::Debug);
    assert_eq!(config.duration_unit, DurationUnit::Microseconds);
    assert_eq!(config.time_format, TimeFormat::UnixMs);
    assert_eq!(config.sink.kind, SinkKind::File);
    assert_eq!(
        config.sink.path.as_deref(),
        Some(Path::new("/var/log/app/sql.log"))
    );
    assert_eq!(
        config.correlation_id_field.as_deref(),
        Some("requestId"),
        "correlation field should be trimmed"
    );

    let keys: Vec<&str> = config.base_fields.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["region", "service", "shard"]);
    assert_eq!(
        config.base_fields.get("shard"),
        Some(&serde_json::Value::from(3))
    );

    Ok(())
}

#[test]
fn parses_toml_fixture() -> Result<(), Box<dyn Error>> {
    let contents = read_fixture("config/logger-config.valid.toml")?;
    let config = parse_logger_config_toml(&contents)?;

    assert_eq!(config.backend, BackendKind::Tracing);
    assert_eq!(config.min_level, Severity::Info);
    assert_eq!(config.duration_unit, DurationUnit::Seconds);
    assert_eq!(config.time_format, TimeFormat::UnixNano);
    assert_eq!(config.sink.kind, SinkKind::Stdout);
    assert!(!config.redact_secrets);
    assert_eq!(config.correlation_id_field.as_deref(), Some("traceId"));
    assert_eq!(
        config.base_fields.get("service"),
        Some(&serde_json::Value::from("billing"))
    );

    Ok(())
}

#[test]
fn loader_detects_format_by_extension() -> Result<(), Box<dyn Error>> {
    let env = LoggerEnv::default();
    let json = load_logger_config_from_path(
        Some(&fixture_path("config/logger-config.valid.json")),
        &env,
    )?;
    let toml = load_logger_config_from_path(
        Some(&fixture_path("config/logger-config.valid.toml")),
        &env,
    )?;

    assert_eq!(json.backend, BackendKind::Json);
    assert_eq!(toml.backend, BackendKind::Tracing);
    Ok(())
}

#[test]
fn invalid_version_fixture_reports_error_code() -> Result<(), Box<dyn Error>> {
    let contents = read_fixture("config/logger-config.invalid-version.json")?;
    let error = parse_logger_config_json(&contents)
        .err()
        .ok_or_else(|| std::io::Error::other("expected invalid fixture error"))?;

    assert_eq!(error.code, ErrorCode::config("unsupported_version"));
    assert_eq!(error.metadata.get("found").map(String::as_str), Some("7"));
    assert_eq!(error.metadata.get("supported").map(String::as_str), Some("1"));
    Ok(())
}

#[test]
fn file_sink_without_path_is_rejected() -> Result<(), Box<dyn Error>> {
    let contents = read_fixture("config/logger-config.file-without-path.json")?;
    let error = parse_logger_config_json(&contents)
        .err()
        .ok_or_else(|| std::io::Error::other("expected sink error"))?;

    assert_eq!(error.code, ErrorCode::config("invalid_sink"));
    assert_eq!(
        error.metadata.get("field").map(String::as_str),
        Some("sink.path")
    );
    Ok(())
}

#[test]
fn reserved_base_field_is_rejected() -> Result<(), Box<dyn Error>> {
    let contents = read_fixture("config/logger-config.reserved-field.json")?;
    let error = parse_logger_config_json(&contents)
        .err()
        .ok_or_else(|| std::io::Error::other("expected field name error"))?;

    assert_eq!(error.code, ErrorCode::config("invalid_field_name"));
    assert_eq!(
        error.metadata.get("field").map(String::as_str),
        Some("baseFields")
    );
    assert_eq!(error.metadata.get("name").map(String::as_str), Some("message"));
    Ok(())
}

#[test]
fn unknown_key_is_rejected() -> Result<(), Box<dyn Error>> {
    let contents = read_fixture("config/logger-config.unknown-key.json")?;
    let error = parse_logger_config_json(&contents)
        .err()
        .ok_or_else(|| std::io::Error::other("expected unknown key error"))?;

    assert_eq!(error.code, ErrorCode::config("invalid_json"));
    assert!(error.message.contains("colour"));
    Ok(())
}
