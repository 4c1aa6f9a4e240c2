//! Error envelope fixtures.

use sqllog_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
use std::io;

/// Codes a caller of the composition root can observe.
pub fn common_error_codes() -> Vec<ErrorCode> {
    vec![
        ErrorCode::invalid_input(),
        ErrorCode::config("invalid_sink"),
        ErrorCode::config("invalid_env_enum"),
        ErrorCode::from_io_kind(io::ErrorKind::NotFound),
        ErrorCode::from_io_kind(io::ErrorKind::PermissionDenied),
        ErrorCode::infra("subscriber_already_set"),
    ]
}

/// A file sink configured without a path.
pub fn invalid_config_error() -> ErrorEnvelope {
    ErrorEnvelope::expected(
        ErrorCode::config("invalid_sink"),
        "sink.path is required when sink.kind is file",
    )
    .with_metadata("field", "sink.path")
}

/// An interrupted sink write.
pub fn interrupted_io_error() -> ErrorEnvelope {
    ErrorEnvelope::unexpected(
        ErrorCode::from_io_kind(io::ErrorKind::Interrupted),
        "interrupted",
        ErrorClass::Retriable,
    )
}
