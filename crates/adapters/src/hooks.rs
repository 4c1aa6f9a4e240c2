//! Commit-time hooks registered on a backend.

use sqllog_ports::{
    ContextKey, CorrelationIdKey, EventHook, HookField, LogContext, Severity, Value,
};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Ordered set of hooks run once per commit.
#[derive(Clone, Default)]
pub struct HookChain {
    hooks: Vec<Arc<dyn EventHook>>,
}

impl HookChain {
    /// An empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Append a hook.
    #[must_use]
    pub fn with(mut self, hook: impl EventHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Append a closure hook.
    #[must_use]
    pub fn with_fn<F>(self, hook: F) -> Self
    where
        F: Fn(&LogContext, Severity, &str) -> Vec<HookField> + Send + Sync + 'static,
    {
        self.with(hook)
    }

    /// Append every hook of `other`, keeping its order.
    #[must_use]
    pub fn chain(mut self, other: Self) -> Self {
        self.hooks.extend(other.hooks);
        self
    }

    /// Append a shared hook.
    pub fn push(&mut self, hook: Arc<dyn EventHook>) {
        self.hooks.push(hook);
    }

    /// Number of registered hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns `true` when no hook is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook in registration order and collect their fields.
    #[must_use]
    pub fn run(&self, ctx: &LogContext, severity: Severity, message: &str) -> Vec<HookField> {
        self.hooks
            .iter()
            .flat_map(|hook| hook.run(ctx, severity, message))
            .collect()
    }
}

impl fmt::Debug for HookChain {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("HookChain")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

/// Projects the context value stored under `K` into a named field.
///
/// Emits nothing when the context carries no value for `K`.
pub struct ContextValueHook<K> {
    field: Box<str>,
    key: PhantomData<fn() -> K>,
}

impl<K> ContextValueHook<K> {
    /// Hook writing `K`'s value under `field`.
    #[must_use]
    pub fn new(field: impl Into<Box<str>>) -> Self {
        Self {
            field: field.into(),
            key: PhantomData,
        }
    }

    /// Field name the value is written under.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl<K> fmt::Debug for ContextValueHook<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ContextValueHook")
            .field("field", &self.field)
            .field("key", &std::any::type_name::<K>())
            .finish()
    }
}

impl<K> EventHook for ContextValueHook<K>
where
    K: ContextKey,
    K::Value: Clone + Into<Value>,
{
    fn run(&self, ctx: &LogContext, _severity: Severity, _message: &str) -> Vec<HookField> {
        ctx.value::<K>()
            .map(|value| vec![(self.field.clone(), value.clone().into())])
            .unwrap_or_default()
    }
}

/// Hook writing the request correlation id under `field`.
#[must_use]
pub fn correlation_id_hook(field: impl Into<Box<str>>) -> ContextValueHook<CorrelationIdKey> {
    ContextValueHook::new(field)
}
