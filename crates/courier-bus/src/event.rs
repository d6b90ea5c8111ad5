// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event payloads emitted by the delivery queue.

use serde::Serialize;

use courier_core::{DeliveryStatus, MessageId};

/// Lifecycle events surfaced to UI consumers.
///
/// Only terminal message outcomes and queue-level lifecycle are surfaced;
/// intermediate retries appear as `StatusChanged` with `Retrying`, never as
/// errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum QueueEvent {
    /// A new message entered the store.
    MessageQueued {
        id: MessageId,
        /// Store depth after the append.
        pending: usize,
    },
    /// A message moved in the delivery state machine.
    StatusChanged {
        id: MessageId,
        status: DeliveryStatus,
        retry_count: u32,
    },
    /// A drain pass began.
    ProcessingStarted,
    /// A drain pass finished.
    ProcessingCompleted {
        /// Messages that reached `Sent` during this pass.
        sent: usize,
    },
    /// The queue was cleared by the embedding application.
    QueueCleared {
        /// Pending messages discarded, including those awaiting a retry timer.
        removed: usize,
    },
}

impl QueueEvent {
    /// Stable event name, matching the serialized `event` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MessageQueued { .. } => "message-queued",
            Self::StatusChanged { .. } => "status-changed",
            Self::ProcessingStarted => "processing-started",
            Self::ProcessingCompleted { .. } => "processing-completed",
            Self::QueueCleared { .. } => "queue-cleared",
        }
    }
}
