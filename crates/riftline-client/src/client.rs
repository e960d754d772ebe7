//! Client façade bundling configuration with one dispatcher.

use std::str::FromStr;

use riftline_model::{Event, EventKind, SchemaResult, parse_event};
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::dispatch::{Dispatcher, EventHandler, Subscription};

/// Entry point a caller interacts with. Owns the configuration and the
/// dispatch registry the future daemon transport will feed.
pub struct Client {
    config: ClientConfig,
    dispatcher: Dispatcher,
}

impl Client {
    /// Build a client around `config`.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            dispatcher: Dispatcher::new(),
        }
    }

    /// Configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Establish the transport session to the configured endpoint.
    ///
    /// The transport does not exist yet, so today this only records the
    /// intent. Contract for the future implementation: idempotent, and safe
    /// to call before any subscription exists.
    pub fn connect(&self) {
        debug!(
            endpoint = %self.config.endpoint,
            live = self.config.live_enabled,
            lcu = self.config.lcu_enabled,
            "connect requested; transport not yet wired"
        );
    }

    /// Register `handler` for `kind`. See [`Dispatcher::subscribe`].
    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.dispatcher.subscribe(kind, handler)
    }

    /// Register an already-shared handler for `kind`.
    pub fn subscribe_handler(&self, kind: EventKind, handler: EventHandler) -> Subscription {
        self.dispatcher.subscribe_handler(kind, handler)
    }

    /// Register `handler` for the kind named by a raw string.
    ///
    /// # Errors
    ///
    /// Fails with [`riftline_model::SchemaError::UnknownEventKind`] when
    /// `kind` is not a member of the closed kind set; nothing is registered
    /// in that case.
    pub fn subscribe_named<F>(&self, kind: &str, handler: F) -> SchemaResult<Subscription>
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let kind = EventKind::from_str(kind)?;
        Ok(self.dispatcher.subscribe(kind, handler))
    }

    /// Dispatch an already-validated event.
    pub fn emit(&self, event: &Event) {
        self.dispatcher.emit(event);
    }

    /// Validate one raw envelope, dispatch it, and hand back the typed event.
    ///
    /// # Errors
    ///
    /// Propagates the [`riftline_model::SchemaError`] when `raw` fails
    /// validation; nothing is dispatched in that case.
    pub fn emit_raw(&self, raw: &Value) -> SchemaResult<Event> {
        let event = parse_event(raw)?;
        self.dispatcher.emit(&event);
        Ok(event)
    }

    /// Kinds with at least one live handler, sorted.
    #[must_use]
    pub fn registered_kinds(&self) -> Vec<EventKind> {
        self.dispatcher.registered_kinds()
    }

    /// Drop every registration. Idempotent; the client stays usable.
    pub fn close(&self) {
        debug!("clearing handler registry");
        self.dispatcher.close();
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}
