//! Structured error payloads attached to report events.
//!
//! [`ThrowableInfo`] captures what the remote service needs to group and
//! display an error: the type name, a message, optional stack frames, and a
//! chain of causes. Events carry one explicitly, embed one as their message,
//! or have one synthesized from plain text by the resolver.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type name used for errors synthesized from plain text and for causes
/// whose concrete type is erased behind `dyn Error`.
pub const GENERIC_TYPE_NAME: &str = "Error";

/// A single frame in an error's stack trace.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceFrame {
    /// Source file the frame originated in.
    pub file: String,
    /// Line number in the source file.
    pub line: u32,
    /// Function or method name.
    pub function: String,
}

impl TraceFrame {
    pub fn new(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            function: function.into(),
        }
    }
}

/// Structured representation of an error and its cause chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowableInfo {
    /// Error type name (e.g. `"std::io::Error"`).
    pub type_name: String,
    /// Human-readable description.
    pub message: String,
    /// Stack frames from innermost to outermost.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<TraceFrame>,
    /// The error this one was caused by, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<ThrowableInfo>>,
}

impl ThrowableInfo {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    /// Synthesize a generic error whose description is the given text.
    ///
    /// Used when an event carries only a plain message: the remote service
    /// still receives a structured error, typed [`GENERIC_TYPE_NAME`].
    pub fn from_message(text: impl Into<String>) -> Self {
        Self::new(GENERIC_TYPE_NAME, text)
    }

    /// Capture a concrete error, walking its `source()` chain into causes.
    ///
    /// The root keeps the concrete type name; chained sources are only
    /// visible as `dyn Error`, so they carry [`GENERIC_TYPE_NAME`] with
    /// their own description.
    pub fn from_error<E: std::error::Error>(error: &E) -> Self {
        let mut info = Self::new(std::any::type_name::<E>(), error.to_string());
        info.cause = error.source().map(|source| Box::new(capture_chain(source)));
        info
    }

    /// Replace the stack frames.
    #[must_use]
    pub fn with_frames(mut self, frames: Vec<TraceFrame>) -> Self {
        self.frames = frames;
        self
    }

    /// Chain a cause onto this error.
    #[must_use]
    pub fn with_cause(mut self, cause: ThrowableInfo) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

fn capture_chain(error: &(dyn std::error::Error + 'static)) -> ThrowableInfo {
    let mut info = ThrowableInfo::new(GENERIC_TYPE_NAME, error.to_string());
    if let Some(source) = error.source() {
        info.cause = Some(Box::new(capture_chain(source)));
    }
    info
}

impl fmt::Display for ThrowableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)
    }
}
