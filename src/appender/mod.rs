//! The append pipeline.
//!
//! [`ReportAppender::append`] is the single entry point events flow
//! through: kill switch, unconditional history buffering, severity
//! threshold, lazy notifier initialization, then blocking dispatch.
//! Failures of any kind stay local: they are logged through the `log`
//! facade at a limited rate and the event is dropped from reporting for
//! that cycle. Logging must never take the host application down.


use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

use log::warn;
use thiserror::Error;

use crate::builder::ReportAppenderBuilder;
use crate::context::ContextBuilder;
use crate::event::LogEvent;
use crate::gate::NotifierGate;
use crate::history::BoundedHistory;
use crate::layout::Layout;
use crate::notifier::NotifierError;
use crate::resolver;
use crate::severity::Severity;
use crate::throttle::WarnThrottle;

thread_local! {
    // Set while this thread is inside `append`. Diagnostics emitted during
    // an append can arrive back here through a global logger bridge; those
    // must not re-enter the gate lock.
    static IN_APPEND: Cell<bool> = const { Cell::new(false) };
}

/// Which phase of an append cycle failed. Both stay local to the appender.
#[derive(Debug, Error)]
enum AppendError {
    #[error("notifier initialization failed: {0}")]
    Init(#[source] NotifierError),
    #[error("dispatch failed: {0}")]
    Dispatch(#[source] NotifierError),
}

/// Everything the builder assembles for an appender.
pub(crate) struct AppenderParts {
    pub(crate) enabled: bool,
    pub(crate) threshold: Severity,
    pub(crate) layout: Box<dyn Layout>,
    pub(crate) history: BoundedHistory,
    pub(crate) context: ContextBuilder,
    pub(crate) gate: NotifierGate,
    pub(crate) throttle: WarnThrottle,
}

/// Buffers every event and forwards qualifying ones to the remote service.
pub struct ReportAppender {
    enabled: bool,
    threshold: Severity,
    layout: Box<dyn Layout>,
    history: BoundedHistory,
    context: ContextBuilder,
    gate: NotifierGate,
    throttle: WarnThrottle,
}

impl ReportAppender {
    /// Start configuring an appender.
    #[must_use]
    pub fn builder() -> ReportAppenderBuilder {
        ReportAppenderBuilder::new()
    }

    pub(crate) fn from_parts(parts: AppenderParts) -> Self {
        Self {
            enabled: parts.enabled,
            threshold: parts.threshold,
            layout: parts.layout,
            history: parts.history,
            context: parts.context,
            gate: parts.gate,
            throttle: parts.throttle,
        }
    }

    /// Process one event.
    ///
    /// Never panics and never returns an error. The event is always
    /// buffered (unless the appender is disabled), forwarded only when its
    /// severity reaches the threshold, and dropped from reporting with a
    /// throttled local warning when anything goes wrong.
    pub fn append(&self, event: &LogEvent) {
        if !self.enabled {
            return;
        }
        if IN_APPEND.with(Cell::get) {
            return;
        }
        IN_APPEND.with(|flag| flag.set(true));
        match panic::catch_unwind(AssertUnwindSafe(|| self.process(event))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => self.note_failure(&err.to_string()),
            Err(payload) => {
                self.note_failure(&format!(
                    "panic while forwarding: {}",
                    panic_reason(payload.as_ref())
                ));
            }
        }
        IN_APPEND.with(|flag| flag.set(false));
    }

    /// Live history buffer, for on-demand snapshots.
    #[must_use]
    pub fn history(&self) -> &BoundedHistory {
        &self.history
    }

    /// Whether the appender processes events at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Severity an event must reach to be forwarded.
    #[must_use]
    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Whether the notifier client has been constructed yet.
    #[must_use]
    pub fn notifier_ready(&self) -> bool {
        self.gate.is_ready()
    }

    fn process(&self, event: &LogEvent) -> Result<(), AppendError> {
        let line = self.layout.format(event);
        self.history.add(line.trim());

        if !event.severity.at_least(self.threshold) {
            return Ok(());
        }

        let notifier = self.gate.ensure_ready().map_err(AppendError::Init)?;
        let message = event.message_text();
        let error = resolver::resolve(event);
        let context = self.context.build(event, self.history.snapshot());
        match error {
            Some(error) => notifier.notify_error(&message, &error, &context),
            None => notifier.notify(&message, &context),
        }
        .map_err(AppendError::Dispatch)
    }

    fn note_failure(&self, reason: &str) {
        self.throttle.record_failure();
        self.throttle.warn_if_due(|count| {
            warn!("ReportAppender: dropped report: {reason} ({count} failures since last notice)");
        });
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> &str {
    if let Some(text) = payload.downcast_ref::<&str>() {
        text
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text
    } else {
        "unknown panic"
    }
}
