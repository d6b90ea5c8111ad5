// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Online/offline edge handling and the smart-send entry point.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use courier_core::{
    CourierError, DeliveryStatus, MessagePayload, QueuedMessage, SendOutcome, Transport,
};
use courier_queue::DeliveryQueue;

/// Translates connectivity signal edges into drain triggers and decides
/// between direct delivery and enqueueing.
///
/// The previous connectivity state is tracked internally, so repeated
/// "online" signals that are not a genuine offline-to-online edge never
/// re-trigger a drain.
pub struct ConnectivityBridge {
    queue: Arc<DeliveryQueue>,
    transport: Arc<dyn Transport>,
    online: AtomicBool,
    /// Self-reference for the monitor task. The task must not keep the
    /// bridge alive past its last external handle.
    weak_self: Weak<ConnectivityBridge>,
}

impl ConnectivityBridge {
    pub fn new(
        queue: Arc<DeliveryQueue>,
        transport: Arc<dyn Transport>,
        initially_online: bool,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            queue,
            transport,
            online: AtomicBool::new(initially_online),
            weak_self: weak_self.clone(),
        })
    }

    /// The underlying delivery queue.
    pub fn queue(&self) -> &Arc<DeliveryQueue> {
        &self.queue
    }

    /// Last observed connectivity state.
    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    /// Try direct delivery first; fall back to enqueueing.
    ///
    /// While online, one direct attempt is made (bounded by the configured
    /// send deadline). On direct success the message never enters the store.
    /// On direct failure, or while offline, the payload is enqueued with
    /// `retry_count` 0 and the queue takes over.
    pub async fn smart_send(&self, payload: MessagePayload) -> SendOutcome {
        if self.is_online() {
            let mut message = QueuedMessage::new(payload.clone());
            message.status = DeliveryStatus::Sending;

            let deadline = self.queue.config().send_timeout();
            let direct =
                match tokio::time::timeout(deadline, self.transport.deliver(&message)).await {
                    Ok(result) => result,
                    Err(_) => Err(CourierError::Timeout { duration: deadline }),
                };

            match direct {
                Ok(()) => {
                    message.status = DeliveryStatus::Sent;
                    debug!(id = %message.id, "message delivered directly");
                    return SendOutcome {
                        delivered: true,
                        queued: false,
                        message,
                    };
                }
                Err(error) => {
                    warn!(%error, "direct send failed, falling back to queue");
                }
            }
        }

        let message = self.queue.enqueue(payload).await;
        SendOutcome {
            delivered: false,
            queued: true,
            message,
        }
    }

    /// Record a connectivity observation. On an offline-to-online edge a
    /// drain pass is started in the background (a no-op if one is already
    /// active).
    pub fn handle_connectivity(&self, is_online: bool) {
        let was_online = self.online.swap(is_online, Ordering::SeqCst);
        if !was_online && is_online {
            info!("connectivity restored, draining queue");
            let queue = self.queue.clone();
            tokio::spawn(async move {
                queue.drain().await;
            });
        } else if was_online && !is_online {
            debug!("connectivity lost");
        }
    }

    /// Feed a connectivity watch channel into [`handle_connectivity`] until
    /// the channel closes or `shutdown` is cancelled.
    ///
    /// [`handle_connectivity`]: Self::handle_connectivity
    pub fn spawn_monitor(
        &self,
        mut connectivity: watch::Receiver<bool>,
        shutdown: CancellationToken,
    ) -> JoinHandle<()> {
        let bridge = self.weak_self.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        debug!("connectivity monitor stopped");
                        break;
                    }
                    changed = connectivity.changed() => {
                        if changed.is_err() {
                            debug!("connectivity signal closed");
                            break;
                        }
                        let is_online = *connectivity.borrow_and_update();
                        let Some(bridge) = bridge.upgrade() else {
                            break;
                        };
                        bridge.handle_connectivity(is_online);
                    }
                }
            }
        })
    }

    /// Discard all pending messages and cancel outstanding retry timers.
    pub async fn clear(&self) -> usize {
        self.queue.clear().await
    }
}
