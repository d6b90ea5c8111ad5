// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event capture for asserting on queue lifecycle in tests.

use std::sync::{Arc, Mutex};

use courier_bus::{EventBus, QueueEvent, Subscription};
use courier_core::{DeliveryStatus, MessageId};

/// Records every event a bus emits, for assertion after the fact.
pub struct RecordingListener {
    events: Arc<Mutex<Vec<QueueEvent>>>,
    _subscription: Subscription,
}

impl RecordingListener {
    /// Subscribe a recorder to `bus`. Recording stops when the listener is
    /// dropped.
    pub fn subscribe_to(bus: &Arc<EventBus>) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let subscription = bus.subscribe(move |event| {
            sink.lock().unwrap().push(event.clone());
        });
        Self {
            events,
            _subscription: subscription,
        }
    }

    /// All recorded events, in emission order.
    pub fn events(&self) -> Vec<QueueEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Recorded `status-changed` events matching `status`, as
    /// `(id, retry_count)` pairs in emission order.
    pub fn status_changes(&self, status: DeliveryStatus) -> Vec<(MessageId, u32)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                QueueEvent::StatusChanged {
                    id,
                    status: s,
                    retry_count,
                } if s == status => Some((id, retry_count)),
                _ => None,
            })
            .collect()
    }

    /// Number of `processing-started` events recorded.
    pub fn drain_passes(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, QueueEvent::ProcessingStarted))
            .count()
    }

    /// `sent` counts from recorded `processing-completed` events.
    pub fn completed_counts(&self) -> Vec<usize> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                QueueEvent::ProcessingCompleted { sent } => Some(sent),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_events_in_order() {
        let bus = EventBus::new();
        let listener = RecordingListener::subscribe_to(&bus);

        bus.notify(&QueueEvent::ProcessingStarted);
        bus.notify(&QueueEvent::ProcessingCompleted { sent: 2 });

        let events = listener.events();
        assert_eq!(events.len(), 2);
        assert_eq!(listener.drain_passes(), 1);
        assert_eq!(listener.completed_counts(), vec![2]);
    }

    #[test]
    fn status_changes_filters_by_status() {
        let bus = EventBus::new();
        let listener = RecordingListener::subscribe_to(&bus);
        let id = MessageId::generate();

        bus.notify(&QueueEvent::StatusChanged {
            id: id.clone(),
            status: DeliveryStatus::Sending,
            retry_count: 0,
        });
        bus.notify(&QueueEvent::StatusChanged {
            id: id.clone(),
            status: DeliveryStatus::Retrying,
            retry_count: 1,
        });

        assert_eq!(
            listener.status_changes(DeliveryStatus::Retrying),
            vec![(id, 1)]
        );
        assert!(listener.status_changes(DeliveryStatus::Failed).is_empty());
    }
}
