//! Field values carried by SQL log events.

use sqllog_shared::CorrelationId;
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

/// Field name: absolute time the statement started.
pub const FIELD_TIME: &str = "time";
/// Field name: elapsed time of the statement.
pub const FIELD_DURATION: &str = "duration";
/// Field name: SQL text.
pub const FIELD_QUERY: &str = "query";
/// Field name: ordered statement arguments.
pub const FIELD_ARGS: &str = "args";
/// Field name: failure description, present only when the call failed.
pub const FIELD_ERROR: &str = "error";

/// Named fields attached to an event.
pub type LogFields = BTreeMap<Box<str>, Value>;

/// A single field value.
///
/// `Null` is structurally empty: at the top level of an event it is omitted,
/// inside a list or map it is kept (a SQL `NULL` argument is meaningful).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point.
    Float(f64),
    /// String.
    Str(Box<str>),
    /// Absolute point in time.
    Time(SystemTime),
    /// Elapsed amount; backends pick the rendering unit.
    Duration(Duration),
    /// Human-readable failure description.
    Error(Box<str>),
    /// Ordered sequence, element types may differ.
    List(Vec<Self>),
    /// Nested named values.
    Map(BTreeMap<Box<str>, Self>),
}

impl Value {
    /// Capture a failure by its human-readable description.
    pub fn error(error: &(dyn std::error::Error + '_)) -> Self {
        Self::Error(error.to_string().into_boxed_str())
    }

    /// Returns true for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the string payload of `Str` and `Error` values.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) | Self::Error(value) => Some(value),
            _ => None,
        }
    }
}

macro_rules! value_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Self::Int(i64::from(value))
            }
        })*
    };
}

macro_rules! value_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Self::UInt(u64::from(value))
            }
        })*
    };
}

value_from_signed!(i8, i16, i32, i64);
value_from_unsigned!(u8, u16, u32, u64);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value.into_boxed_str())
    }
}

impl From<Box<str>> for Value {
    fn from(value: Box<str>) -> Self {
        Self::Str(value)
    }
}

impl From<SystemTime> for Value {
    fn from(value: SystemTime) -> Self {
        Self::Time(value)
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}

impl From<CorrelationId> for Value {
    fn from(value: CorrelationId) -> Self {
        Self::Str(value.as_str().into())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        Self::List(iter.into_iter().collect())
    }
}
