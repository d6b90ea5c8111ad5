// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The delivery queue: store, drain processor, and retry controller.
//!
//! One [`DeliveryQueue`] instance is created and owned by the embedding
//! application (never a process-wide singleton). The transport, event bus,
//! and scheduler are injected at construction.
//!
//! State machine per message:
//!
//! ```text
//! Queued -> Sending -> Sent                                  (terminal)
//! Queued -> Sending -> Retrying -> (backoff) -> Queued -> ...
//! Queued -> Sending -> Failed                                (terminal)
//! ```
//!
//! A message lives in the store exactly while it is `Queued`; it is dropped
//! the moment it reaches `Sent` or `Failed`. At most one drain pass is active
//! per instance, and at most one send attempt is in flight at any instant.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Weak};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use courier_bus::{EventBus, QueueEvent};
use courier_config::QueueConfig;
use courier_core::{
    CourierError, DeliveryStatus, MessagePayload, QueueStatus, QueuedMessage, Transport,
};

use crate::backoff::backoff_delay;
use crate::metrics;
use crate::scheduler::{Scheduler, TokioScheduler};
use crate::store::QueueState;

/// Reliable outbound delivery queue.
///
/// Guarantees that an enqueued message is eventually handed to the transport
/// despite transient failures, without duplication or silent loss, up to the
/// configured retry limit.
pub struct DeliveryQueue {
    config: QueueConfig,
    transport: Arc<dyn Transport>,
    bus: Arc<EventBus>,
    scheduler: Arc<dyn Scheduler>,
    state: Mutex<QueueState>,
    /// Self-reference for retry timers and resumed drain passes. A pending
    /// timer must never keep the queue alive.
    weak_self: Weak<DeliveryQueue>,
}

impl DeliveryQueue {
    /// Create a queue using the tokio timer wheel for backoff.
    pub fn new(
        config: QueueConfig,
        transport: Arc<dyn Transport>,
        bus: Arc<EventBus>,
    ) -> Arc<Self> {
        Self::with_scheduler(config, transport, bus, Arc::new(TokioScheduler))
    }

    /// Create a queue with an explicit scheduler.
    pub fn with_scheduler(
        config: QueueConfig,
        transport: Arc<dyn Transport>,
        bus: Arc<EventBus>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            config,
            transport,
            bus,
            scheduler,
            state: Mutex::new(QueueState::new()),
            weak_self: weak_self.clone(),
        })
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// Append a new message to the tail of the store. Always succeeds.
    ///
    /// Emits `message-queued`. The returned record is a snapshot; subsequent
    /// status changes are observable only through the event bus.
    pub async fn enqueue(&self, payload: MessagePayload) -> QueuedMessage {
        let message = QueuedMessage::new(payload);
        let pending = {
            let mut state = self.state.lock().await;
            state.queue.push_back(message.clone());
            state.queue.len()
        };
        metrics::record_enqueued();
        debug!(id = %message.id, pending, "message enqueued");
        self.bus.notify(&QueueEvent::MessageQueued {
            id: message.id.clone(),
            pending,
        });
        message
    }

    /// Run one drain pass: send every stored message front-to-back.
    ///
    /// Returns `None` without doing anything if another pass is already
    /// active (single-flight), otherwise `Some(sent)` with the number of
    /// messages that reached `Sent` during this pass.
    ///
    /// A transient failure hands the message to the retry controller and the
    /// pass moves on immediately; only the terminal outcomes surface as
    /// events. No error escapes this method.
    pub async fn drain(&self) -> Option<usize> {
        let generation = {
            let mut state = self.state.lock().await;
            if state.draining {
                debug!("drain pass already active, skipping");
                return None;
            }
            state.draining = true;
            state.generation
        };
        info!("drain pass started");
        self.bus.notify(&QueueEvent::ProcessingStarted);

        let mut sent = 0usize;
        loop {
            // Pop-or-finish and the draining flag share one critical section,
            // so a reinsertion can never slip between "store is empty" and
            // "pass is over".
            let next = {
                let mut state = self.state.lock().await;
                if state.generation != generation {
                    state.draining = false;
                    None
                } else if let Some(mut message) = state.queue.pop_front() {
                    message.status = DeliveryStatus::Sending;
                    state.in_flight = true;
                    Some(message)
                } else {
                    state.draining = false;
                    None
                }
            };
            let Some(mut message) = next else { break };

            self.bus.notify(&QueueEvent::StatusChanged {
                id: message.id.clone(),
                status: DeliveryStatus::Sending,
                retry_count: message.retry_count,
            });

            let attempt = self.attempt_send(&message).await;

            let stale = {
                let mut state = self.state.lock().await;
                state.in_flight = false;
                if state.generation != generation {
                    state.draining = false;
                    true
                } else {
                    false
                }
            };
            if stale {
                // The queue was cleared while this send was in flight; the
                // result belongs to a discarded message.
                debug!(id = %message.id, "discarding send result for cleared message");
                break;
            }

            match attempt {
                Ok(()) => {
                    message.status = DeliveryStatus::Sent;
                    sent += 1;
                    metrics::record_sent();
                    debug!(id = %message.id, "message delivered");
                    self.bus.notify(&QueueEvent::StatusChanged {
                        id: message.id.clone(),
                        status: DeliveryStatus::Sent,
                        retry_count: message.retry_count,
                    });
                    let has_more = !self.state.lock().await.queue.is_empty();
                    if has_more {
                        tokio::time::sleep(self.config.inter_message_pause()).await;
                    }
                }
                Err(error) => {
                    message.retry_count += 1;
                    if message.retry_count < self.config.max_retries {
                        message.status = DeliveryStatus::Retrying;
                        metrics::record_retry();
                        warn!(
                            id = %message.id,
                            retry_count = message.retry_count,
                            %error,
                            "send failed, scheduling retry"
                        );
                        self.bus.notify(&QueueEvent::StatusChanged {
                            id: message.id.clone(),
                            status: DeliveryStatus::Retrying,
                            retry_count: message.retry_count,
                        });
                        self.schedule_retry(message, generation).await;
                    } else {
                        message.status = DeliveryStatus::Failed;
                        metrics::record_failed();
                        warn!(
                            id = %message.id,
                            retry_count = message.retry_count,
                            %error,
                            "retries exhausted, message failed"
                        );
                        self.bus.notify(&QueueEvent::StatusChanged {
                            id: message.id.clone(),
                            status: DeliveryStatus::Failed,
                            retry_count: message.retry_count,
                        });
                    }
                }
            }
        }

        info!(sent, "drain pass completed");
        self.bus.notify(&QueueEvent::ProcessingCompleted { sent });
        Some(sent)
    }

    /// One send attempt, bounded by the configured per-send deadline.
    /// A deadline elapse counts as a transient failure like any other.
    async fn attempt_send(&self, message: &QueuedMessage) -> Result<(), CourierError> {
        let deadline = self.config.send_timeout();
        match tokio::time::timeout(deadline, self.transport.deliver(message)).await {
            Ok(result) => result,
            Err(_) => Err(CourierError::Timeout { duration: deadline }),
        }
    }

    /// Arm a one-shot backoff timer that reinserts `message` at the tail.
    async fn schedule_retry(&self, message: QueuedMessage, generation: u64) {
        let delay = backoff_delay(
            message.retry_count,
            self.config.base_delay(),
            self.config.max_delay(),
        );
        debug!(id = %message.id, delay_ms = delay.as_millis() as u64, "retry timer armed");

        let id = message.id.clone();
        let weak = self.weak_self.clone();
        let timer = self.scheduler.after(
            delay,
            Box::pin(async move {
                if let Some(queue) = weak.upgrade() {
                    queue.reinsert(message, generation).await;
                }
            }),
        );
        self.state.lock().await.timers.insert(id, timer);
    }

    /// Timer callback: return a retrying message to the tail of the store,
    /// and resume delivery if no drain pass is active.
    ///
    /// Boxed to break the `drain` -> `schedule_retry` -> `reinsert` ->
    /// `drain` opaque-future cycle so the futures can be proven `Send`.
    fn reinsert(
        &self,
        message: QueuedMessage,
        generation: u64,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(self.reinsert_inner(message, generation))
    }

    async fn reinsert_inner(&self, mut message: QueuedMessage, generation: u64) {
        let resume = {
            let mut state = self.state.lock().await;
            state.timers.remove(&message.id);
            if state.generation != generation {
                // Cleared while the backoff timer was pending.
                return;
            }
            message.status = DeliveryStatus::Queued;
            state.queue.push_back(message.clone());
            !state.draining
        };
        debug!(
            id = %message.id,
            retry_count = message.retry_count,
            "message reinserted after backoff"
        );
        self.bus.notify(&QueueEvent::StatusChanged {
            id: message.id.clone(),
            status: DeliveryStatus::Queued,
            retry_count: message.retry_count,
        });
        if resume {
            if let Some(queue) = self.weak_self.upgrade() {
                tokio::spawn(async move {
                    queue.drain().await;
                });
            }
        }
    }

    /// Point-in-time counts for observability.
    pub async fn status(&self) -> QueueStatus {
        self.state.lock().await.snapshot()
    }

    /// Discard all pending messages and cancel every outstanding retry timer.
    ///
    /// A send attempt already in flight is not interrupted; its result is
    /// discarded when it completes. Emits `queue-cleared` with the count
    /// removed.
    pub async fn clear(&self) -> usize {
        let removed = self.state.lock().await.clear_pending();
        info!(removed, "queue cleared");
        self.bus.notify(&QueueEvent::QueueCleared { removed });
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_test_utils::{MockTransport, RecordingListener};

    fn queue_with(transport: Arc<MockTransport>) -> Arc<DeliveryQueue> {
        DeliveryQueue::new(QueueConfig::default(), transport, EventBus::new())
    }

    #[tokio::test]
    async fn enqueue_assigns_distinct_ids_and_counts() {
        let queue = queue_with(Arc::new(MockTransport::new()));

        let a = queue.enqueue(MessagePayload::text("a")).await;
        let b = queue.enqueue(MessagePayload::text("b")).await;

        assert_ne!(a.id, b.id);
        assert_eq!(a.status, DeliveryStatus::Queued);

        let status = queue.status().await;
        assert_eq!(status.queued, 2);
        assert_eq!(status.total, 2);
        assert!(!status.processing);
    }

    #[tokio::test]
    async fn drain_on_empty_queue_reports_zero() {
        let queue = queue_with(Arc::new(MockTransport::new()));
        assert_eq!(queue.drain().await, Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn successful_drain_empties_store_in_order() {
        let transport = Arc::new(MockTransport::new());
        let queue = queue_with(transport.clone());

        let a = queue.enqueue(MessagePayload::text("first")).await;
        let b = queue.enqueue(MessagePayload::text("second")).await;

        assert_eq!(queue.drain().await, Some(2));
        assert_eq!(transport.delivered_ids().await, vec![a.id, b.id]);
        assert_eq!(queue.status().await, QueueStatus::default());
    }

    #[tokio::test(start_paused = true)]
    async fn clear_cancels_pending_retry_timer() {
        let transport = Arc::new(MockTransport::always_failing());
        let queue = DeliveryQueue::new(
            QueueConfig::default(),
            transport.clone(),
            EventBus::new(),
        );

        queue.enqueue(MessagePayload::text("doomed")).await;
        queue.drain().await;

        // The first failure armed a backoff timer.
        assert_eq!(queue.status().await.retrying, 1);

        let removed = queue.clear().await;
        assert_eq!(removed, 1);
        assert_eq!(queue.status().await, QueueStatus::default());

        // Past the backoff delay, the cancelled timer must not resurrect
        // the message.
        tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        assert_eq!(queue.status().await, QueueStatus::default());
        assert_eq!(transport.total_attempts().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_message_emits_terminal_event_at_retry_limit() {
        let transport = Arc::new(MockTransport::always_failing());
        let bus = EventBus::new();
        let listener = RecordingListener::subscribe_to(&bus);
        let queue = DeliveryQueue::new(QueueConfig::default(), transport, bus);

        queue.enqueue(MessagePayload::text("doomed")).await;
        queue.drain().await;
        // Let both backoff timers fire and their resumed passes finish.
        tokio::time::sleep(std::time::Duration::from_secs(10)).await;

        let failed: Vec<u32> = listener
            .status_changes(DeliveryStatus::Failed)
            .into_iter()
            .map(|(_, retry_count)| retry_count)
            .collect();
        assert_eq!(failed, vec![3], "failed exactly at max_retries");
        assert_eq!(listener.status_changes(DeliveryStatus::Retrying).len(), 2);
        assert_eq!(queue.status().await, QueueStatus::default());
    }
}
