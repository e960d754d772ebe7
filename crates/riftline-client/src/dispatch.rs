//! Kind-keyed handler registry with snapshot dispatch.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use riftline_model::{Event, EventKind};
use tracing::trace;

/// Callback invoked with each dispatched event of a subscribed kind.
pub type EventHandler = Arc<dyn Fn(&Event) + Send + Sync>;

/// Identifier minted per registration. [`Subscription::close`] removes
/// exactly the entry carrying its id.
type SubscriberId = u64;

type Registry = HashMap<EventKind, Vec<(SubscriberId, EventHandler)>>;

#[derive(Default)]
struct DispatcherState {
    registry: Registry,
    next_id: SubscriberId,
}

/// Routes events to handlers registered per [`EventKind`].
///
/// Every operation runs to completion on the caller's thread. `emit` copies
/// the handler list for the event's kind before invoking anything, so
/// subscribe/unsubscribe calls made from inside a handler only affect future
/// emits. Handler failures are not isolated: a panic aborts delivery to the
/// rest of the snapshot.
///
/// Cloning yields another handle onto the same registry.
#[derive(Clone, Default)]
pub struct Dispatcher {
    inner: Arc<Mutex<DispatcherState>>,
}

impl Dispatcher {
    /// Construct an empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind`, after any existing registrations.
    ///
    /// Returns the [`Subscription`] that undoes this registration.
    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.subscribe_handler(kind, Arc::new(handler))
    }

    /// Register an already-shared handler for `kind`.
    ///
    /// The same handler may be registered any number of times; each
    /// registration dispatches (and is closed) independently.
    pub fn subscribe_handler(&self, kind: EventKind, handler: EventHandler) -> Subscription {
        let mut state = self.lock_state();
        let id = state.next_id;
        state.next_id += 1;
        state.registry.entry(kind).or_default().push((id, handler));
        trace!(kind = kind.as_str(), id, "handler subscribed");
        Subscription {
            state: Arc::downgrade(&self.inner),
            kind,
            id,
        }
    }

    /// Invoke every handler registered for `event.kind`, in subscription
    /// order.
    ///
    /// The handler list is snapshotted under the lock and the lock released
    /// before the first invocation, so handlers may freely mutate the
    /// registry; such mutations apply to future emits only.
    pub fn emit(&self, event: &Event) {
        let snapshot: Vec<EventHandler> = {
            let state = self.lock_state();
            state
                .registry
                .get(&event.kind)
                .map(|entries| entries.iter().map(|(_, handler)| Arc::clone(handler)).collect())
                .unwrap_or_default()
        };
        trace!(
            kind = event.kind.as_str(),
            handlers = snapshot.len(),
            "dispatching event"
        );
        for handler in snapshot {
            handler(event);
        }
    }

    /// Kinds that currently have at least one live handler, sorted.
    #[must_use]
    pub fn registered_kinds(&self) -> Vec<EventKind> {
        let state = self.lock_state();
        let mut kinds: Vec<EventKind> = state
            .registry
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(kind, _)| *kind)
            .collect();
        kinds.sort_unstable();
        kinds
    }

    /// Drop every registration for every kind.
    ///
    /// Idempotent. The dispatcher stays usable: subscribe calls made after
    /// close succeed normally.
    pub fn close(&self) {
        let mut state = self.lock_state();
        state.registry.clear();
    }

    fn lock_state(&self) -> MutexGuard<'_, DispatcherState> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Capability to undo one registration made through subscribe.
#[derive(Debug)]
pub struct Subscription {
    state: Weak<Mutex<DispatcherState>>,
    kind: EventKind,
    id: SubscriberId,
}

impl Subscription {
    /// Remove the registration this subscription was minted for.
    ///
    /// Silent no-op when the registration is already gone, whether through an
    /// earlier `close` on this handle, a dispatcher-wide close, or the
    /// dispatcher having been dropped. Idempotent.
    pub fn close(&self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        let mut state = state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let mut kind_is_empty = false;
        if let Some(entries) = state.registry.get_mut(&self.kind) {
            if let Some(index) = entries.iter().position(|(id, _)| *id == self.id) {
                entries.remove(index);
                trace!(kind = self.kind.as_str(), id = self.id, "handler unsubscribed");
            }
            kind_is_empty = entries.is_empty();
        }
        if kind_is_empty {
            state.registry.remove(&self.kind);
        }
    }
}
