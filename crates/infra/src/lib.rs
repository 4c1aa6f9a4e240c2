//! # sqllog-infra
//!
//! Runtime composition: turns a validated config into a ready SQL logger.
//! This crate depends on `adapters`, `config`, `ports`, and `shared`.

/// Config loading helpers used by tooling surfaces.
pub mod config_check;
/// Environment validation helpers used by tooling surfaces.
pub mod env_check;
/// Logger construction from config.
pub mod observability;

pub use config_check::load_effective_config_json;
pub use env_check::{InfraError, InfraResult, validate_env_parsing};
pub use observability::{
    backend_with_sink, config_hooks, ensure_correlation_id, install_tracing_subscriber,
    sink_from_config, sql_logger_from_config, sql_logger_from_env, sql_logger_with_sink,
};

// Re-export redaction utilities for boundary sanitization
pub use sqllog_shared::{is_secret_key, redact_if_secret};

/// Returns the infra crate version.
#[must_use]
pub const fn infra_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqllog_adapters::adapters_crate_version;
    use sqllog_config::config_crate_version;
    use sqllog_shared::shared_crate_version;

    fn workspace_deps() -> Vec<String> {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let mut deps = Vec::new();
        let mut in_deps = false;

        for raw_line in cargo_toml.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                in_deps = line == "[dependencies]";
                continue;
            }
            if in_deps && line.starts_with("sqllog-") {
                let key = line.split('=').next().unwrap_or("").trim();
                let name = key.split('.').next().unwrap_or("").trim();
                deps.push(name.to_string());
            }
        }

        deps
    }

    #[test]
    fn infra_depends_on_adapters_and_config() {
        let deps = workspace_deps();
        for expected in ["sqllog-adapters", "sqllog-config"] {
            assert!(
                deps.iter().any(|dep| dep == expected),
                "missing dependency: {expected}"
            );
        }
        assert!(
            !deps.iter().any(|dep| dep == "sqllog-testkit"),
            "testkit must stay a dev-dependency"
        );
    }

    #[test]
    fn infra_can_use_adapters_config_shared() {
        assert!(!infra_crate_version().is_empty());
        assert!(!adapters_crate_version().is_empty());
        assert!(!config_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }
}
