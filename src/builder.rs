//! Builder for [`ReportAppender`](crate::appender::ReportAppender).
//!
//! Exposes the kill switch, severity threshold, history capacity, layout,
//! endpoint and credential settings, proxy and TLS options, and the
//! notifier injection seams. Structural mistakes (zero capacity, zero
//! timeouts, blank endpoint) fail `build()`; credential problems are
//! deliberately left to lazy initialization so a misconfigured appender
//! degrades instead of refusing to construct.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::appender::{AppenderParts, ReportAppender};
use crate::context::ContextBuilder;
use crate::gate::NotifierGate;
use crate::history::{BoundedHistory, DEFAULT_HISTORY_CAPACITY};
use crate::layout::{DefaultLayout, Layout};
use crate::notifier::{Notifier, NotifierConfig, NotifierFactory};
use crate::severity::Severity;
use crate::throttle::WarnThrottle;

/// Default severity an event must reach to be forwarded.
pub const DEFAULT_THRESHOLD: Severity = Severity::Error;

/// Errors raised for structurally invalid builder configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid appender configuration: {0}")]
    InvalidConfig(String),
}

macro_rules! ensure_positive {
    ($value:expr, $field:expr) => {{
        if $value == 0 {
            Err(BuildError::InvalidConfig(format!(
                "{} must be greater than zero",
                $field
            )))
        } else {
            Ok($value)
        }
    }};
}

macro_rules! option_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

/// Builder for constructing [`ReportAppender`] instances.
#[derive(Default)]
pub struct ReportAppenderBuilder {
    enabled: Option<bool>,
    threshold: Option<Severity>,
    history_capacity: Option<usize>,
    context_key: Option<String>,
    endpoint: Option<String>,
    api_key: Option<String>,
    environment: Option<String>,
    proxy_host: Option<String>,
    proxy_port: Option<u16>,
    skip_cert_verification: bool,
    connect_timeout_ms: Option<u64>,
    request_timeout_ms: Option<u64>,
    layout: Option<Box<dyn Layout>>,
    notifier: Option<Arc<dyn Notifier>>,
    factory: Option<Box<dyn NotifierFactory>>,
}

impl ReportAppenderBuilder {
    /// Create a builder with every option at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ingestion endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the access token for the remote service.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the environment name reported with every item.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Set the proxy host. Ignored unless a port is also set.
    pub fn with_proxy_host(mut self, host: impl Into<String>) -> Self {
        self.proxy_host = Some(host.into());
        self
    }

    /// Set the key for the default context entry.
    pub fn with_context_key(mut self, key: impl Into<String>) -> Self {
        self.context_key = Some(key.into());
        self
    }

    /// Replace the layout used to render history lines.
    pub fn with_layout(mut self, layout: impl Layout + 'static) -> Self {
        self.layout = Some(Box::new(layout));
        self
    }

    /// Inject a pre-built notifier; lazy initialization is skipped.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Inject the factory run at lazy initialization time.
    pub fn with_notifier_factory(mut self, factory: impl NotifierFactory + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Disable TLS certificate verification for the HTTP client.
    pub fn with_skip_cert_verification(mut self, skip: bool) -> Self {
        self.skip_cert_verification = skip;
        self
    }

    option_setter!(
        #[doc = "Enable or disable the appender (the kill switch)."]
        with_enabled,
        enabled,
        bool
    );
    option_setter!(
        #[doc = "Set the minimum severity forwarded to the remote service."]
        with_threshold,
        threshold,
        Severity
    );
    option_setter!(
        #[doc = "Set how many history lines are retained."]
        with_history_capacity,
        history_capacity,
        usize
    );
    option_setter!(
        #[doc = "Set the proxy port. Ignored unless a host is also set."]
        with_proxy_port,
        proxy_port,
        u16
    );
    option_setter!(
        #[doc = "Set the connect timeout in milliseconds."]
        with_connect_timeout_ms,
        connect_timeout_ms,
        u64
    );
    option_setter!(
        #[doc = "Set the whole-request timeout in milliseconds."]
        with_request_timeout_ms,
        request_timeout_ms,
        u64
    );

    fn validate(&self) -> Result<(), BuildError> {
        self.validate_endpoint()?;
        self.validate_capacity()?;
        self.validate_timeouts()?;
        Ok(())
    }

    fn validate_endpoint(&self) -> Result<(), BuildError> {
        match &self.endpoint {
            Some(endpoint) if endpoint.trim().is_empty() => Err(BuildError::InvalidConfig(
                "endpoint must not be empty".into(),
            )),
            _ => Ok(()),
        }
    }

    fn validate_capacity(&self) -> Result<(), BuildError> {
        if let Some(capacity) = self.history_capacity {
            ensure_positive!(capacity, "history_capacity")?;
        }
        Ok(())
    }

    fn validate_timeouts(&self) -> Result<(), BuildError> {
        if let Some(timeout) = self.connect_timeout_ms {
            ensure_positive!(timeout, "connect_timeout_ms")?;
        }
        if let Some(timeout) = self.request_timeout_ms {
            ensure_positive!(timeout, "request_timeout_ms")?;
        }
        Ok(())
    }

    /// Assemble the appender.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidConfig`] for zero capacity or timeouts
    /// and for an explicitly blank endpoint. A missing API key is not a
    /// build error: it surfaces as a caught initialization failure when
    /// the first qualifying event arrives.
    pub fn build(self) -> Result<ReportAppender, BuildError> {
        self.validate()?;

        let defaults = NotifierConfig::default();
        let config = NotifierConfig {
            endpoint: self.endpoint.unwrap_or(defaults.endpoint),
            api_key: self.api_key.unwrap_or(defaults.api_key),
            environment: self.environment.unwrap_or(defaults.environment),
            proxy_host: self.proxy_host,
            proxy_port: self.proxy_port,
            skip_cert_verification: self.skip_cert_verification,
            connect_timeout: self
                .connect_timeout_ms
                .map_or(defaults.connect_timeout, Duration::from_millis),
            request_timeout: self
                .request_timeout_ms
                .map_or(defaults.request_timeout, Duration::from_millis),
        };

        let gate = match (self.notifier, self.factory) {
            (Some(notifier), _) => NotifierGate::ready(notifier),
            (None, Some(factory)) => NotifierGate::with_factory(config, factory),
            (None, None) => NotifierGate::new(config),
        };

        Ok(ReportAppender::from_parts(AppenderParts {
            enabled: self.enabled.unwrap_or(true),
            threshold: self.threshold.unwrap_or(DEFAULT_THRESHOLD),
            layout: self.layout.unwrap_or_else(|| Box::new(DefaultLayout)),
            history: BoundedHistory::new(
                self.history_capacity.unwrap_or(DEFAULT_HISTORY_CAPACITY),
            ),
            context: ContextBuilder::new(self.context_key.as_deref()),
            gate,
            throttle: WarnThrottle::new(),
        }))
    }
}
