// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Listener registry with failure isolation.
//!
//! Listeners are invoked synchronously in registration order. A panicking
//! listener is caught and logged; it can never block other listeners or the
//! drain loop that emitted the event.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tracing::{debug, error};

use crate::event::QueueEvent;

type Listener = Arc<dyn Fn(&QueueEvent) + Send + Sync>;

/// Synchronous observer registry for queue lifecycle events.
pub struct EventBus {
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_id: AtomicU64,
    /// Self-reference handed to subscriptions so dropping one can
    /// unsubscribe without keeping the bus alive.
    weak_self: Weak<EventBus>,
}

impl EventBus {
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            weak_self: weak_self.clone(),
        })
    }

    /// Register a listener. The returned [`Subscription`] unsubscribes the
    /// listener when dropped.
    pub fn subscribe(
        &self,
        listener: impl Fn(&QueueEvent) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .expect("event bus lock poisoned")
            .push((id, Arc::new(listener)));
        debug!(listener_id = id, "listener subscribed");
        Subscription {
            id,
            bus: self.weak_self.clone(),
        }
    }

    /// Deliver an event to every registered listener, in registration order.
    ///
    /// Listener panics are caught and logged, never propagated. The listener
    /// list is snapshotted before invocation, so listeners may subscribe or
    /// unsubscribe from within a callback without deadlocking.
    pub fn notify(&self, event: &QueueEvent) {
        let snapshot: Vec<(u64, Listener)> = self
            .listeners
            .lock()
            .expect("event bus lock poisoned")
            .clone();

        for (id, listener) in snapshot {
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                error!(
                    listener_id = id,
                    event = event.name(),
                    "listener panicked; continuing with remaining listeners"
                );
            }
        }
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().expect("event bus lock poisoned").len()
    }

    fn unsubscribe(&self, id: u64) {
        self.listeners
            .lock()
            .expect("event bus lock poisoned")
            .retain(|(listener_id, _)| *listener_id != id);
        debug!(listener_id = id, "listener unsubscribed");
    }
}

/// RAII handle for a registered listener. Dropping it removes the listener.
pub struct Subscription {
    id: u64,
    bus: Weak<EventBus>,
}

impl Subscription {
    /// Remove the listener now instead of at drop time.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.unsubscribe(self.id);
        }
    }
}
