//! Buffered log forwarding to a remote error tracker.
//!
//! `femtoreport` keeps a bounded history of recently formatted log lines
//! and forwards events at or above a severity threshold to an error
//! tracking service over HTTPS, attaching the buffered lines as context.
//! Dispatch failures are contained: nothing raised by the layout, the
//! notifier, or the transport escapes [`ReportAppender::append`].
//!
//! ```
//! use femtoreport::{LogEvent, ReportAppender, Severity};
//!
//! # fn main() -> Result<(), femtoreport::BuildError> {
//! let appender = ReportAppender::builder()
//!     .with_api_key("server-token")
//!     .with_environment("production")
//!     .build()?;
//!
//! // Below the default Error threshold: buffered, never dispatched.
//! appender.append(&LogEvent::new(Severity::Info, "service started"));
//! assert_eq!(appender.history().len(), 1);
//! # Ok(())
//! # }
//! ```

mod appender;
mod builder;
mod context;
mod event;
mod gate;
mod history;
mod layout;
mod log_bridge;
mod notifier;
mod resolver;
mod severity;
mod throttle;
mod throwable;

pub use appender::ReportAppender;
pub use builder::{BuildError, ReportAppenderBuilder, DEFAULT_THRESHOLD};
pub use context::{Context, ContextBuilder, DEFAULT_CONTEXT_KEY, LOG_BUFFER_KEY};
pub use event::{EventMessage, LogEvent};
pub use gate::NotifierGate;
pub use history::{BoundedHistory, DEFAULT_HISTORY_CAPACITY};
pub use layout::{DefaultLayout, Layout};
pub use log_bridge::{install, LogBridge};
pub use notifier::{
    HttpNotifier, HttpNotifierFactory, Notifier, NotifierConfig, NotifierError, NotifierFactory,
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT,
};
pub use severity::{ParseSeverityError, Severity};
pub use throttle::{TimeProvider, WarnThrottle};
pub use throwable::{ThrowableInfo, TraceFrame, GENERIC_TYPE_NAME};
