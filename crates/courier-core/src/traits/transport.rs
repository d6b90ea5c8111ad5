// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport trait implemented by the embedding application.

use async_trait::async_trait;

use crate::error::CourierError;
use crate::types::QueuedMessage;

/// The actual network call that delivers a message (HTTP call to the chat
/// backend, websocket frame, etc.). Implemented outside this workspace and
/// injected into the queue at construction.
///
/// A returned `Err` of any kind counts as one failed attempt; the queue makes
/// no distinction between transport error classes. "Accepted by transport" is
/// the only acknowledgment the queue tracks.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Attempt to deliver one message.
    async fn deliver(&self, message: &QueuedMessage) -> Result<(), CourierError>;
}
