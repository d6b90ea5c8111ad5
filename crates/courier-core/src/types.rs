// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Courier workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a queued message, assigned at enqueue time and
/// stable until the message reaches a terminal status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Delivery state of a queued message.
///
/// `Sent` and `Failed` are terminal; a message is dropped from the store the
/// moment it reaches either.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// Waiting in the store for the next drain pass.
    Queued,
    /// A send attempt is in flight right now.
    Sending,
    /// Accepted by the transport. Terminal.
    Sent,
    /// A send attempt failed; a backoff timer will reinsert the message.
    Retrying,
    /// All retry attempts exhausted. Terminal.
    Failed,
}

impl DeliveryStatus {
    /// Whether no further transitions occur from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Sent | Self::Failed)
    }
}

/// Caller-defined message content. Opaque to the queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    /// Message body text.
    pub text: String,
    /// Opaque references to already-uploaded attachments.
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl MessagePayload {
    /// Convenience constructor for a plain text payload.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachments: Vec::new(),
        }
    }
}

/// The unit of work tracked by the delivery queue.
#[derive(Debug, Clone, Serialize)]
pub struct QueuedMessage {
    /// Stable identifier assigned at enqueue time.
    pub id: MessageId,
    /// Caller-supplied content.
    pub payload: MessagePayload,
    /// Current position in the delivery state machine.
    pub status: DeliveryStatus,
    /// Set once at creation, never updated.
    pub enqueued_at: DateTime<Utc>,
    /// Failed send attempts so far. Never exceeds the configured maximum.
    pub retry_count: u32,
}

impl QueuedMessage {
    /// Create a fresh message in `Queued` state with a generated id.
    pub fn new(payload: MessagePayload) -> Self {
        Self {
            id: MessageId::generate(),
            payload,
            status: DeliveryStatus::Queued,
            enqueued_at: Utc::now(),
            retry_count: 0,
        }
    }
}

/// Point-in-time queue counts for observability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueStatus {
    /// All messages the queue is still responsible for.
    pub total: usize,
    /// Messages waiting in the store.
    pub queued: usize,
    /// Messages with a send attempt in flight (0 or 1).
    pub sending: usize,
    /// Messages waiting on a backoff timer.
    pub retrying: usize,
    /// Whether a drain pass is active.
    pub processing: bool,
}

/// Result of a smart send: either delivered directly or enqueued for later.
#[derive(Debug, Clone, Serialize)]
pub struct SendOutcome {
    /// The transport accepted the message on the direct attempt.
    pub delivered: bool,
    /// The message was placed in the queue instead.
    pub queued: bool,
    /// The message record, with its final (direct path) or current
    /// (queued path) status.
    pub message: QueuedMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn generated_ids_are_distinct() {
        let a = MessageId::generate();
        let b = MessageId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn status_display_round_trips() {
        for status in [
            DeliveryStatus::Queued,
            DeliveryStatus::Sending,
            DeliveryStatus::Sent,
            DeliveryStatus::Retrying,
            DeliveryStatus::Failed,
        ] {
            let s = status.to_string();
            assert_eq!(DeliveryStatus::from_str(&s).unwrap(), status);
        }
    }

    #[test]
    fn only_sent_and_failed_are_terminal() {
        assert!(DeliveryStatus::Sent.is_terminal());
        assert!(DeliveryStatus::Failed.is_terminal());
        assert!(!DeliveryStatus::Queued.is_terminal());
        assert!(!DeliveryStatus::Sending.is_terminal());
        assert!(!DeliveryStatus::Retrying.is_terminal());
    }

    #[test]
    fn new_message_starts_queued_with_zero_retries() {
        let msg = QueuedMessage::new(MessagePayload::text("hello"));
        assert_eq!(msg.status, DeliveryStatus::Queued);
        assert_eq!(msg.retry_count, 0);
        assert_eq!(msg.payload.text, "hello");
        assert!(msg.payload.attachments.is_empty());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&DeliveryStatus::Retrying).unwrap();
        assert_eq!(json, "\"retrying\"");
    }
}
