//! Remote notification seam.
//!
//! The pipeline dispatches through the [`Notifier`] trait. Production
//! deployments use [`HttpNotifier`] built by [`HttpNotifierFactory`];
//! tests substitute in-memory doubles. Factories own client construction
//! so [`NotifierGate`](crate::gate::NotifierGate) can defer it until the
//! first qualifying event.

mod config;
mod http;


use std::sync::Arc;

use thiserror::Error;

use crate::context::Context;
use crate::throwable::ThrowableInfo;

pub use config::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT, NotifierConfig,
};
pub use http::{HttpNotifier, HttpNotifierFactory};

/// Errors surfaced by notifier construction and dispatch.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// Configuration rejected while constructing the client.
    #[error("invalid notifier configuration: {0}")]
    InvalidConfig(String),
    /// The endpoint answered with a non-success status.
    #[error("notification rejected with HTTP status {status}")]
    Rejected { status: u16 },
    /// The request never completed (connect failure, timeout, TLS error).
    #[error("transport failure: {0}")]
    Transport(String),
    /// The payload could not be serialized.
    #[error("payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Client for the remote error-tracking service.
pub trait Notifier: Send + Sync {
    /// Report a plain message with its context.
    fn notify(&self, message: &str, context: &Context) -> Result<(), NotifierError>;

    /// Report a structured error with its context.
    fn notify_error(
        &self,
        message: &str,
        error: &ThrowableInfo,
        context: &Context,
    ) -> Result<(), NotifierError>;
}

/// Builds notifier clients on demand.
pub trait NotifierFactory: Send + Sync {
    /// Construct a ready-to-use client from `config`.
    fn initialize(&self, config: &NotifierConfig) -> Result<Arc<dyn Notifier>, NotifierError>;
}
