//! Configuration consumed when constructing the HTTP notifier client.
//!
//! `ReportAppenderBuilder` assembles these values;
//! [`HttpNotifierFactory`](super::HttpNotifierFactory) validates and
//! applies them at lazy initialization time.

use std::time::Duration;

/// Default ingestion endpoint for report items.
pub const DEFAULT_ENDPOINT: &str = "https://api.rollbar.com/api/1/item/";
/// Default timeout for establishing HTTP connections.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default timeout for a whole request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings describing how to reach the remote error-tracking service.
#[derive(Clone, Debug)]
pub struct NotifierConfig {
    /// Ingestion endpoint URL.
    pub endpoint: String,
    /// Access token for the remote service.
    pub api_key: String,
    /// Deployment environment reported with every item.
    pub environment: String,
    /// Proxy host; only applied together with `proxy_port`.
    pub proxy_host: Option<String>,
    /// Proxy port; only applied together with `proxy_host`.
    pub proxy_port: Option<u16>,
    /// Disable TLS certificate and hostname verification for this client.
    pub skip_cert_verification: bool,
    /// Timeout for establishing connections.
    pub connect_timeout: Duration,
    /// Timeout for the whole request.
    pub request_timeout: Duration,
}

impl NotifierConfig {
    /// The proxy address, present only when both host and port are set.
    ///
    /// A half-specified proxy is treated as no proxy at all.
    #[must_use]
    pub fn proxy_address(&self) -> Option<String> {
        match (&self.proxy_host, self.proxy_port) {
            (Some(host), Some(port)) => Some(format!("{host}:{port}")),
            _ => None,
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            api_key: String::new(),
            environment: String::new(),
            proxy_host: None,
            proxy_port: None,
            skip_cert_verification: false,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
