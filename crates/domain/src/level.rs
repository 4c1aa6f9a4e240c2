//! Generic instrumentation levels and backend severities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Level reported by the SQL instrumentation layer.
///
/// The instrumentation layer only defines four levels, but the value is an
/// open integer: callers may pass anything, and consumers must cope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Level(i32);

impl Level {
    /// Most verbose: every driver call.
    pub const TRACE: Self = Self(0);
    /// Statement-level detail.
    pub const DEBUG: Self = Self(1);
    /// Normal operation.
    pub const INFO: Self = Self(2);
    /// A driver call failed.
    pub const ERROR: Self = Self(3);

    /// Wrap a raw level value, recognized or not.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw level value.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Returns the level name when the value is one of the known constants.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("trace"),
            1 => Some("debug"),
            2 => Some("info"),
            3 => Some("error"),
            _ => None,
        }
    }

    /// Returns true when the value is one of the known constants.
    #[must_use]
    pub const fn is_known(self) -> bool {
        self.name().is_some()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => formatter.write_str(name),
            None => write!(formatter, "level({})", self.0),
        }
    }
}

/// Severity understood by logging backends, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Trace.
    Trace,
    /// Debug.
    #[default]
    Debug,
    /// Info.
    Info,
    /// Warn.
    Warn,
    /// Error.
    Error,
}

impl Severity {
    /// Every severity, least severe first.
    pub const ALL: [Self; 5] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
    ];

    /// Lowercase label emitted in the `level` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Returns true when an event at `self` passes a `min` threshold.
    #[must_use]
    pub const fn is_at_least(self, min: Self) -> bool {
        self as u8 >= min as u8
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Returned when a severity name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeverityError {
    /// Raw input value.
    pub value: String,
}

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "unknown severity `{}` (expected trace, debug, info, warn, or error)",
            self.value
        )
    }
}

impl std::error::Error for ParseSeverityError {}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ParseSeverityError {
                value: value.to_string(),
            }),
        }
    }
}
