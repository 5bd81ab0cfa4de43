//! Report event representation.
//!
//! [`LogEvent`] is the value the host logging framework hands to the append
//! pipeline: a severity, whatever was logged (text, an error object, or
//! nothing usable), an optional explicitly-attached error, and the
//! diagnostics map carrying correlation attributes for the event.

use std::collections::BTreeMap;
use std::fmt;
use std::time::SystemTime;

use crate::severity::Severity;
use crate::throwable::ThrowableInfo;

/// The renderable payload of an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventMessage {
    /// Plain text, the common case.
    Text(String),
    /// An error object logged in the message position.
    Thrown(ThrowableInfo),
}

impl fmt::Display for EventMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Thrown(info) => info.fmt(f),
        }
    }
}

/// A single event flowing through the append pipeline.
#[derive(Clone, Debug)]
pub struct LogEvent {
    /// Severity the event was logged at.
    pub severity: Severity,
    /// What was logged; `None` when the host message had no usable rendering.
    pub message: Option<EventMessage>,
    /// Error explicitly attached alongside the message.
    pub throwable: Option<ThrowableInfo>,
    /// Time the event was created.
    pub timestamp: SystemTime,
    /// Correlation and request-scoped attributes carried with the event.
    pub diagnostics: BTreeMap<String, String>,
}

impl LogEvent {
    /// Construct an event with a plain text message.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: Some(EventMessage::Text(message.into())),
            throwable: None,
            timestamp: SystemTime::now(),
            diagnostics: BTreeMap::new(),
        }
    }

    /// Construct an event whose message position holds an error object.
    pub fn from_throwable(severity: Severity, thrown: ThrowableInfo) -> Self {
        Self {
            message: Some(EventMessage::Thrown(thrown)),
            ..Self::empty(severity)
        }
    }

    /// Construct an event with no renderable message.
    pub fn empty(severity: Severity) -> Self {
        Self {
            severity,
            message: None,
            throwable: None,
            timestamp: SystemTime::now(),
            diagnostics: BTreeMap::new(),
        }
    }

    /// Attach an explicit error to the event.
    #[must_use]
    pub fn with_throwable(mut self, throwable: ThrowableInfo) -> Self {
        self.throwable = Some(throwable);
        self
    }

    /// Add one diagnostics entry.
    #[must_use]
    pub fn with_diagnostic(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.diagnostics.insert(key.into(), value.into());
        self
    }

    /// Replace the creation timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: SystemTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Render the message for dispatch; events without one yield `""`.
    #[must_use]
    pub fn message_text(&self) -> String {
        match &self.message {
            Some(message) => message.to_string(),
            None => String::new(),
        }
    }
}
