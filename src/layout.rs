//! Layout seam for rendering events into history lines.
//!
//! The pipeline stores formatted lines, not events, so hosts can plug in
//! whatever rendering their logs already use. [`DefaultLayout`] is used
//! when no layout is configured.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::event::LogEvent;

/// Renders an event into the single line kept in the history buffer.
pub trait Layout: Send + Sync {
    fn format(&self, event: &LogEvent) -> String;
}

/// Default layout: RFC 3339 timestamp, severity, message.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLayout;

impl Layout for DefaultLayout {
    fn format(&self, event: &LogEvent) -> String {
        let timestamp: DateTime<Utc> = event.timestamp.into();
        format!(
            "{} {:<5} {}",
            timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            event.severity.as_str(),
            event.message_text(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use rstest::rstest;

    use super::*;
    use crate::severity::Severity;

    #[rstest]
    fn renders_timestamp_severity_and_message() {
        let event =
            LogEvent::new(Severity::Error, "boom").with_timestamp(SystemTime::UNIX_EPOCH);
        assert_eq!(
            DefaultLayout.format(&event),
            "1970-01-01T00:00:00.000Z ERROR boom"
        );
    }

    #[rstest]
    fn pads_short_severity_names() {
        let event =
            LogEvent::new(Severity::Info, "up").with_timestamp(SystemTime::UNIX_EPOCH);
        assert_eq!(
            DefaultLayout.format(&event),
            "1970-01-01T00:00:00.000Z INFO  up"
        );
    }
}
