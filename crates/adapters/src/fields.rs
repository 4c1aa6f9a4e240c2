//! Field dispatch from generic values to typed builder setters.

use sqllog_ports::{EventBuilder, LogFields, Value};

/// Attach one field through the setter matching its type.
///
/// Top-level `Null` is omitted: an absent error on a successful call must not
/// produce an `error` key.
pub fn attach_field<E: EventBuilder + ?Sized>(builder: &mut E, key: &str, value: &Value) {
    match value {
        Value::Null => {},
        Value::Bool(value) => builder.bool(key, *value),
        Value::Int(value) => builder.int(key, *value),
        Value::UInt(value) => builder.uint(key, *value),
        Value::Float(value) => builder.float(key, *value),
        Value::Str(value) | Value::Error(value) => builder.str(key, value),
        Value::Time(value) => builder.time(key, *value),
        Value::Duration(value) => builder.duration(key, *value),
        Value::List(values) => builder.array(key, values),
        Value::Map(values) => builder.map(key, values),
    }
}

/// Attach every field in key order.
pub fn attach_fields<E: EventBuilder + ?Sized>(builder: &mut E, fields: &LogFields) {
    for (key, value) in fields {
        attach_field(builder, key, value);
    }
}
