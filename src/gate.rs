//! One-time initialization of the remote notifier.
//!
//! Events race to be the first past the severity threshold; the gate
//! guarantees the client is constructed exactly once, with initialization
//! side effects finished before any caller dispatches through it. Failed
//! initialization leaves the gate uninitialized so a later event retries.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::notifier::{
    HttpNotifierFactory, Notifier, NotifierConfig, NotifierError, NotifierFactory,
};

enum GateState {
    Uninitialized,
    Ready(Arc<dyn Notifier>),
}

/// Lazy, thread-safe handle to the notifier client.
pub struct NotifierGate {
    config: NotifierConfig,
    factory: Box<dyn NotifierFactory>,
    // parking_lot mutex: a panicking factory cannot poison the gate.
    state: Mutex<GateState>,
}

impl NotifierGate {
    /// Gate that builds the production HTTP client on first use.
    #[must_use]
    pub fn new(config: NotifierConfig) -> Self {
        Self::with_factory(config, Box::new(HttpNotifierFactory))
    }

    /// Gate that defers to `factory` on first use.
    #[must_use]
    pub fn with_factory(config: NotifierConfig, factory: Box<dyn NotifierFactory>) -> Self {
        Self {
            config,
            factory,
            state: Mutex::new(GateState::Uninitialized),
        }
    }

    /// Gate around an already-built client. The factory path is never
    /// taken, so the construction config is irrelevant here.
    #[must_use]
    pub fn ready(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config: NotifierConfig::default(),
            factory: Box::new(HttpNotifierFactory),
            state: Mutex::new(GateState::Ready(notifier)),
        }
    }

    /// Return the client, constructing it on first call.
    ///
    /// Concurrent first callers serialize on the internal lock: exactly one
    /// runs the factory while the rest block, then observe its outcome. On
    /// failure the error is returned and the gate stays uninitialized; the
    /// next call runs the factory again, side effects included.
    pub fn ensure_ready(&self) -> Result<Arc<dyn Notifier>, NotifierError> {
        let mut state = self.state.lock();
        match &*state {
            GateState::Ready(notifier) => Ok(Arc::clone(notifier)),
            GateState::Uninitialized => {
                let notifier = self.factory.initialize(&self.config)?;
                *state = GateState::Ready(Arc::clone(&notifier));
                Ok(notifier)
            }
        }
    }

    /// Whether a client has been constructed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(&*self.state.lock(), GateState::Ready(_))
    }
}
