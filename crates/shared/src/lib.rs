//! # sqllog-shared
//!
//! Shared utilities, result types, and error handling for the sqllog workspace.
//!
//! - Result and error envelope types
//! - Secret redaction helpers used by config errors and the JSON backend
//! - Request correlation identifiers
//!
//! This crate has no workspace dependencies.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod correlation;
pub mod errors;
pub mod redaction;
pub mod result;

pub use correlation::CorrelationId;
pub use errors::{ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use redaction::{REDACTED, is_secret_key, redact_if_secret};
pub use result::Result;

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
