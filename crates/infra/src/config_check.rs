//! Effective config inspection.

use crate::InfraResult;
use sqllog_config::{LoggerEnv, load_logger_config_from_path, to_pretty_json};
use sqllog_shared::ErrorEnvelope;
use std::collections::BTreeMap;
use std::path::Path;

/// Load and validate the effective config, returning deterministic pretty JSON.
pub fn load_effective_config_json(
    env: &BTreeMap<String, String>,
    config_path: Option<&Path>,
) -> InfraResult<String> {
    let env = LoggerEnv::from_map(env).map_err(ErrorEnvelope::from)?;
    let config = load_logger_config_from_path(config_path, &env)?;
    to_pretty_json(&config)
}
