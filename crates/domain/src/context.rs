//! Request-scoped context passed alongside every log call.
//!
//! The adapter never reads the context itself; it forwards it to the backend
//! so hooks registered there can project ambient values into the event.
//! Keys are marker types, so a value can only be read by code that can name
//! the key.

use sqllog_shared::CorrelationId;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A typed context key. The implementing type is the key; `Value` is what it
/// stores.
pub trait ContextKey: 'static {
    /// Type of the stored value.
    type Value: Send + Sync + 'static;
}

/// Key for the request correlation id.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationIdKey;

impl ContextKey for CorrelationIdKey {
    type Value = CorrelationId;
}

/// Immutable key/value carrier.
///
/// Deriving a context with [`LogContext::with_value`] never mutates the
/// parent; lookups walk from the newest entry, so a later value for the same
/// key shadows earlier ones.
#[derive(Clone, Default)]
pub struct LogContext {
    head: Option<Arc<Entry>>,
}

struct Entry {
    key: TypeId,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Entry>>,
}

impl LogContext {
    /// An empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None }
    }

    /// Derive a context that also carries `value` under `K`.
    #[must_use]
    pub fn with_value<K: ContextKey>(&self, value: K::Value) -> Self {
        Self {
            head: Some(Arc::new(Entry {
                key: TypeId::of::<K>(),
                value: Arc::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// Derive a context carrying a correlation id.
    #[must_use]
    pub fn with_correlation_id(&self, id: CorrelationId) -> Self {
        self.with_value::<CorrelationIdKey>(id)
    }

    /// Look up the newest value stored under `K`.
    #[must_use]
    pub fn value<K: ContextKey>(&self) -> Option<&K::Value> {
        let key = TypeId::of::<K>();
        let mut current = self.head.as_deref();
        while let Some(entry) = current {
            if entry.key == key {
                return entry.value.downcast_ref::<K::Value>();
            }
            current = entry.parent.as_deref();
        }
        None
    }

    /// Returns the correlation id, if one was attached.
    #[must_use]
    pub fn correlation_id(&self) -> Option<&CorrelationId> {
        self.value::<CorrelationIdKey>()
    }

    /// Returns true when no values are attached.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn len(&self) -> usize {
        let mut count = 0;
        let mut current = self.head.as_deref();
        while let Some(entry) = current {
            count += 1;
            current = entry.parent.as_deref();
        }
        count
    }
}

impl fmt::Debug for LogContext {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LogContext")
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TenantKey;

    impl ContextKey for TenantKey {
        type Value = String;
    }

    struct RetryKey;

    impl ContextKey for RetryKey {
        type Value = u32;
    }

    #[test]
    fn empty_context_has_no_values() {
        let ctx = LogContext::new();
        assert!(ctx.is_empty());
        assert!(ctx.value::<TenantKey>().is_none());
        assert!(ctx.correlation_id().is_none());
    }

    #[test]
    fn values_are_found_by_key_type() {
        let ctx = LogContext::new()
            .with_value::<TenantKey>("acme".to_string())
            .with_value::<RetryKey>(2);

        assert_eq!(ctx.value::<TenantKey>().map(String::as_str), Some("acme"));
        assert_eq!(ctx.value::<RetryKey>(), Some(&2));
    }

    #[test]
    fn newer_values_shadow_older_without_mutating_parent() {
        let parent = LogContext::new().with_value::<TenantKey>("old".to_string());
        let child = parent.with_value::<TenantKey>("new".to_string());

        assert_eq!(child.value::<TenantKey>().map(String::as_str), Some("new"));
        assert_eq!(parent.value::<TenantKey>().map(String::as_str), Some("old"));
    }

    #[test]
    fn correlation_id_helpers_round_trip() -> sqllog_shared::Result<()> {
        let id = CorrelationId::parse("req_7")?;
        let ctx = LogContext::default().with_correlation_id(id.clone());
        assert_eq!(ctx.correlation_id(), Some(&id));
        assert_eq!(format!("{ctx:?}"), "LogContext { entries: 1 }");
        Ok(())
    }
}
