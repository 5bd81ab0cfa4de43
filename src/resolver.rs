//! Error extraction for outgoing notifications.
//!
//! Dispatch wants a structured error whenever one can be derived from the
//! event. The sources are ordered: an explicitly attached error always
//! wins, then an error object sitting in the message position, then an
//! error synthesized from plain message text. Events with none of these
//! yield `None` and dispatch falls back to the message-only call.

use crate::event::{EventMessage, LogEvent};
use crate::throwable::ThrowableInfo;

/// Derive the error payload to send for `event`, if any.
#[must_use]
pub fn resolve(event: &LogEvent) -> Option<ThrowableInfo> {
    if let Some(info) = &event.throwable {
        return Some(info.clone());
    }
    match &event.message {
        Some(EventMessage::Thrown(info)) => Some(info.clone()),
        Some(EventMessage::Text(text)) => Some(ThrowableInfo::from_message(text.clone())),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::severity::Severity;
    use crate::throwable::GENERIC_TYPE_NAME;

    #[rstest]
    fn explicit_throwable_wins_over_text_message() {
        let event = LogEvent::new(Severity::Error, "context text")
            .with_throwable(ThrowableInfo::new("DbError", "connection lost"));
        let info = resolve(&event).expect("resolved");
        assert_eq!(info.type_name, "DbError");
        assert_eq!(info.message, "connection lost");
    }

    #[rstest]
    fn explicit_throwable_wins_over_thrown_message() {
        let event =
            LogEvent::from_throwable(Severity::Error, ThrowableInfo::new("Inner", "from message"))
                .with_throwable(ThrowableInfo::new("Outer", "explicit"));
        let info = resolve(&event).expect("resolved");
        assert_eq!(info.type_name, "Outer");
    }

    #[rstest]
    fn thrown_message_is_used_without_wrapping() {
        let thrown = ThrowableInfo::new("ParseError", "bad digit")
            .with_cause(ThrowableInfo::new("Utf8Error", "invalid byte"));
        let event = LogEvent::from_throwable(Severity::Error, thrown.clone());
        assert_eq!(resolve(&event), Some(thrown));
    }

    #[rstest]
    fn text_message_synthesizes_generic_error() {
        let event = LogEvent::new(Severity::Error, "x");
        let info = resolve(&event).expect("resolved");
        assert_eq!(info.type_name, GENERIC_TYPE_NAME);
        assert_eq!(info.message, "x");
    }

    #[rstest]
    fn event_without_message_or_throwable_resolves_none() {
        assert_eq!(resolve(&LogEvent::empty(Severity::Error)), None);
    }
}
