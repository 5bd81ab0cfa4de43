//! Notification context assembly.
//!
//! Each outgoing notification carries a context mapping assembled from
//! three layers: the configured default entry, the event's diagnostics
//! verbatim, and a [`LOG_BUFFER_KEY`] entry holding the history snapshot
//! taken for this notification.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::event::LogEvent;

/// Key under which the history snapshot is attached.
pub const LOG_BUFFER_KEY: &str = "LOG_BUFFER";

/// Fallback key for the default context entry.
pub const DEFAULT_CONTEXT_KEY: &str = "DefaultContext";

/// Context mapping sent with every notification.
pub type Context = BTreeMap<String, Value>;

/// Builds per-notification contexts from a fixed default map.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    defaults: Context,
}

impl ContextBuilder {
    /// Create a builder whose default map holds one empty-valued entry
    /// under `context_key`, or [`DEFAULT_CONTEXT_KEY`] when absent.
    #[must_use]
    pub fn new(context_key: Option<&str>) -> Self {
        let mut defaults = Context::new();
        defaults.insert(
            context_key.unwrap_or(DEFAULT_CONTEXT_KEY).to_owned(),
            Value::String(String::new()),
        );
        Self { defaults }
    }

    /// Assemble the context for one notification.
    ///
    /// The default map is cloned, never mutated, so concurrent builds
    /// cannot interfere. Event diagnostics are copied in verbatim. The
    /// history snapshot is inserted last so [`LOG_BUFFER_KEY`] holds it
    /// even when a diagnostics entry uses the same key.
    #[must_use]
    pub fn build(&self, event: &LogEvent, history: Vec<String>) -> Context {
        let mut context = self.defaults.clone();
        for (key, value) in &event.diagnostics {
            context.insert(key.clone(), Value::String(value.clone()));
        }
        context.insert(LOG_BUFFER_KEY.to_owned(), Value::from(history));
        context
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new(None)
    }
}
