//! Bridge from the Rust `log` facade into a report appender.
//!
//! [`LogBridge`] implements `log::Log`, converting each record into a
//! [`LogEvent`] (severity mapped, target and source location carried as
//! diagnostics) and feeding it to the append pipeline. [`install`] sets a
//! bridge as the process-wide logger so existing `log` macro call sites
//! flow into the history buffer and threshold reporting unchanged.

use std::sync::Arc;

use log::{Metadata, Record};
use once_cell::sync::OnceCell;

use crate::appender::ReportAppender;
use crate::event::LogEvent;
use crate::severity::Severity;

/// Adapter implementing the `log::Log` trait over a report appender.
pub struct LogBridge {
    appender: Arc<ReportAppender>,
}

impl LogBridge {
    pub fn new(appender: Arc<ReportAppender>) -> Self {
        Self { appender }
    }

    fn event_for(record: &Record<'_>) -> LogEvent {
        let mut event = LogEvent::new(Severity::from(record.level()), record.args().to_string())
            .with_diagnostic("target", record.target());
        if let Some(module_path) = record.module_path() {
            event = event.with_diagnostic("module_path", module_path);
        }
        if let Some(file) = record.file() {
            event = event.with_diagnostic("file", file);
        }
        if let Some(line) = record.line() {
            event = event.with_diagnostic("line", line.to_string());
        }
        event
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        self.appender.is_enabled()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.appender.is_enabled() {
            return;
        }
        // The appender guards against reentry itself: diagnostics the
        // pipeline emits while forwarding this record come back through
        // here and are dropped instead of recursing into the gate.
        self.appender.append(&Self::event_for(record));
    }

    fn flush(&self) {}
}

static INSTALL_RESULT: OnceCell<bool> = OnceCell::new();

/// Install a bridge over `appender` as the global Rust logger.
///
/// Returns `true` on success. When a different global logger is already
/// set, installation fails and `false` is returned. Subsequent calls
/// return the cached outcome and ignore their argument.
pub fn install(appender: Arc<ReportAppender>) -> bool {
    *INSTALL_RESULT.get_or_init(|| {
        if log::set_boxed_logger(Box::new(LogBridge::new(appender))).is_err() {
            return false;
        }
        log::set_max_level(log::LevelFilter::Trace);
        true
    })
}

#[cfg(test)]
mod tests {
    //! Unit tests exercising the adapter directly, without the global
    //! logger.

    use parking_lot::Mutex;
    use rstest::rstest;

    use super::*;
    use crate::context::Context;
    use crate::notifier::{Notifier, NotifierError};
    use crate::throwable::ThrowableInfo;

    #[rstest]
    #[case(log::Level::Trace, Severity::Trace)]
    #[case(log::Level::Debug, Severity::Debug)]
    #[case(log::Level::Info, Severity::Info)]
    #[case(log::Level::Warn, Severity::Warn)]
    #[case(log::Level::Error, Severity::Error)]
    fn level_mapping_is_direct(#[case] level: log::Level, #[case] expected: Severity) {
        assert_eq!(Severity::from(level), expected);
    }

    #[derive(Default)]
    struct CollectingNotifier {
        calls: Mutex<Vec<(String, Context)>>,
    }

    impl CollectingNotifier {
        fn dispatches(&self) -> Vec<(String, Context)> {
            self.calls.lock().clone()
        }
    }

    impl Notifier for CollectingNotifier {
        fn notify(&self, message: &str, context: &Context) -> Result<(), NotifierError> {
            self.calls.lock().push((message.to_owned(), context.clone()));
            Ok(())
        }

        fn notify_error(
            &self,
            message: &str,
            _error: &ThrowableInfo,
            context: &Context,
        ) -> Result<(), NotifierError> {
            self.calls.lock().push((message.to_owned(), context.clone()));
            Ok(())
        }
    }

    fn bridged_appender() -> (Arc<CollectingNotifier>, Arc<ReportAppender>, LogBridge) {
        let notifier = Arc::new(CollectingNotifier::default());
        let appender = Arc::new(
            ReportAppender::builder()
                .with_notifier(notifier.clone())
                .build()
                .expect("build appender"),
        );
        let bridge = LogBridge::new(Arc::clone(&appender));
        (notifier, appender, bridge)
    }

    #[rstest]
    fn forwards_error_records_with_source_diagnostics() {
        let (notifier, _appender, bridge) = bridged_appender();

        let record = log::Record::builder()
            .args(format_args!("bridge boom"))
            .level(log::Level::Error)
            .target("app::payments")
            .module_path(Some("app::payments"))
            .file(Some("payments.rs"))
            .line(Some(7))
            .build();
        log::Log::log(&bridge, &record);

        let dispatches = notifier.dispatches();
        assert_eq!(dispatches.len(), 1);
        assert_eq!(dispatches[0].0, "bridge boom");
        let context = &dispatches[0].1;
        assert_eq!(context["target"], "app::payments");
        assert_eq!(context["module_path"], "app::payments");
        assert_eq!(context["file"], "payments.rs");
        assert_eq!(context["line"], "7");
    }

    #[rstest]
    fn buffers_low_severity_records_without_dispatch() {
        let (notifier, appender, bridge) = bridged_appender();

        let record = log::Record::builder()
            .args(format_args!("just info"))
            .level(log::Level::Info)
            .target("app")
            .build();
        log::Log::log(&bridge, &record);

        assert!(notifier.dispatches().is_empty());
        assert_eq!(appender.history().len(), 1);
    }

    #[rstest]
    fn disabled_appender_silences_the_bridge() {
        let notifier = Arc::new(CollectingNotifier::default());
        let appender = Arc::new(
            ReportAppender::builder()
                .with_notifier(notifier.clone())
                .with_enabled(false)
                .build()
                .expect("build appender"),
        );
        let bridge = LogBridge::new(Arc::clone(&appender));

        let record = log::Record::builder()
            .args(format_args!("dropped"))
            .level(log::Level::Error)
            .target("app")
            .build();
        log::Log::log(&bridge, &record);

        assert!(notifier.dispatches().is_empty());
        assert!(appender.history().is_empty());
        assert!(!log::Log::enabled(&bridge, &log::Metadata::builder().build()));
    }
}
