//! Blocking HTTP client for the remote error-tracking service.
//!
//! Each client owns a `ureq` agent, which gives connection pooling and
//! scopes the proxy and TLS settings to this notifier rather than the
//! whole process. Dispatch is a single attempt; the append pipeline
//! handles failures and retry never happens here.

use std::sync::Arc;

use chrono::Utc;
use log::{debug, warn};
use serde::Serialize;
use ureq::{Agent, AgentBuilder};

use super::{Notifier, NotifierConfig, NotifierError, NotifierFactory};
use crate::context::Context;
use crate::throwable::ThrowableInfo;

/// Severity the remote service records for forwarded items. Everything
/// passing the appender threshold is reported at this one level.
const ITEM_LEVEL: &str = "error";

/// Builds [`HttpNotifier`] clients from validated configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpNotifierFactory;

impl NotifierFactory for HttpNotifierFactory {
    fn initialize(&self, config: &NotifierConfig) -> Result<Arc<dyn Notifier>, NotifierError> {
        Ok(Arc::new(HttpNotifier::new(config)?))
    }
}

/// Client posting report items to the configured endpoint.
pub struct HttpNotifier {
    agent: Agent,
    endpoint: String,
    api_key: String,
    environment: String,
}

impl HttpNotifier {
    /// Validate `config` and build the pooled agent.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::InvalidConfig`] for an empty API key, a
    /// non-http(s) endpoint, or an unusable proxy or TLS configuration.
    pub fn new(config: &NotifierConfig) -> Result<Self, NotifierError> {
        validate(config)?;
        let agent = build_agent(config)?;
        Ok(Self {
            agent,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            environment: config.environment.clone(),
        })
    }

    fn post(&self, payload: &ItemPayload<'_>) -> Result<(), NotifierError> {
        let body = serde_json::to_string(payload)?;
        let result = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_string(&body)
            .map_err(Box::new);
        match result {
            Ok(response) => succeed_or_reject(response.status()),
            Err(err) => match *err {
                ureq::Error::Status(status, _) => succeed_or_reject(status),
                ureq::Error::Transport(transport_err) => {
                    Err(NotifierError::Transport(transport_err.to_string()))
                }
            },
        }
    }
}

impl Notifier for HttpNotifier {
    fn notify(&self, message: &str, context: &Context) -> Result<(), NotifierError> {
        debug!("HttpNotifier: sending message item");
        self.post(&ItemPayload::message(self, message, context))
    }

    fn notify_error(
        &self,
        message: &str,
        error: &ThrowableInfo,
        context: &Context,
    ) -> Result<(), NotifierError> {
        debug!("HttpNotifier: sending trace item");
        self.post(&ItemPayload::trace(self, message, error, context))
    }
}

fn validate(config: &NotifierConfig) -> Result<(), NotifierError> {
    if config.api_key.trim().is_empty() {
        return Err(NotifierError::InvalidConfig(
            "api_key must not be empty".to_owned(),
        ));
    }
    if !config.endpoint.starts_with("http://") && !config.endpoint.starts_with("https://") {
        return Err(NotifierError::InvalidConfig(format!(
            "endpoint must be an http(s) URL, got {:?}",
            config.endpoint
        )));
    }
    Ok(())
}

fn build_agent(config: &NotifierConfig) -> Result<Agent, NotifierError> {
    let mut builder = AgentBuilder::new()
        .timeout_connect(config.connect_timeout)
        .timeout(config.request_timeout);
    if config.skip_cert_verification {
        warn!(
            "HttpNotifier: TLS certificate verification disabled for {}; \
             reports can be intercepted",
            config.endpoint
        );
        let connector = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true)
            .build()
            .map_err(|err| NotifierError::InvalidConfig(format!("TLS connector: {err}")))?;
        builder = builder.tls_connector(Arc::new(connector));
    }
    if let Some(address) = config.proxy_address() {
        let proxy = ureq::Proxy::new(&address)
            .map_err(|err| NotifierError::InvalidConfig(format!("proxy {address:?}: {err}")))?;
        builder = builder.proxy(proxy);
    }
    Ok(builder.build())
}

fn succeed_or_reject(status: u16) -> Result<(), NotifierError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(NotifierError::Rejected { status })
    }
}

/// One report item, shaped for the ingestion API.
#[derive(Serialize)]
struct ItemPayload<'a> {
    access_token: &'a str,
    data: ItemData<'a>,
}

#[derive(Serialize)]
struct ItemData<'a> {
    environment: &'a str,
    level: &'static str,
    timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    body: ItemBody<'a>,
    custom: &'a Context,
    notifier: NotifierIdent,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum ItemBody<'a> {
    Message { body: &'a str },
    Trace(TraceBody),
    TraceChain(Vec<TraceBody>),
}

#[derive(Serialize)]
struct TraceBody {
    frames: Vec<FrameBody>,
    exception: ExceptionBody,
}

#[derive(Serialize)]
struct FrameBody {
    filename: String,
    lineno: u32,
    method: String,
}

#[derive(Serialize)]
struct ExceptionBody {
    class: String,
    message: String,
}

#[derive(Serialize)]
struct NotifierIdent {
    name: &'static str,
    version: &'static str,
}

impl Default for NotifierIdent {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

impl<'a> ItemPayload<'a> {
    fn message(notifier: &'a HttpNotifier, message: &'a str, context: &'a Context) -> Self {
        Self {
            access_token: &notifier.api_key,
            data: ItemData {
                environment: &notifier.environment,
                level: ITEM_LEVEL,
                timestamp: Utc::now().timestamp(),
                title: None,
                body: ItemBody::Message { body: message },
                custom: context,
                notifier: NotifierIdent::default(),
            },
        }
    }

    fn trace(
        notifier: &'a HttpNotifier,
        message: &'a str,
        error: &'a ThrowableInfo,
        context: &'a Context,
    ) -> Self {
        Self {
            access_token: &notifier.api_key,
            data: ItemData {
                environment: &notifier.environment,
                level: ITEM_LEVEL,
                timestamp: Utc::now().timestamp(),
                title: (!message.is_empty()).then_some(message),
                body: ItemBody::for_error(error),
                custom: context,
                notifier: NotifierIdent::default(),
            },
        }
    }
}

impl ItemBody<'_> {
    /// Single-cause errors serialize as `trace`, chained ones as
    /// `trace_chain` ordered outermost first.
    fn for_error(error: &ThrowableInfo) -> Self {
        if error.cause.is_none() {
            return Self::Trace(TraceBody::from_info(error));
        }
        let mut chain = Vec::new();
        let mut node = Some(error);
        while let Some(info) = node {
            chain.push(TraceBody::from_info(info));
            node = info.cause.as_deref();
        }
        Self::TraceChain(chain)
    }
}

impl TraceBody {
    fn from_info(info: &ThrowableInfo) -> Self {
        Self {
            frames: info
                .frames
                .iter()
                .map(|frame| FrameBody {
                    filename: frame.file.clone(),
                    lineno: frame.line,
                    method: frame.function.clone(),
                })
                .collect(),
            exception: ExceptionBody {
                class: info.type_name.clone(),
                message: info.message.clone(),
            },
        }
    }
}
