// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock transport for deterministic testing.
//!
//! `MockTransport` implements `Transport` with scripted per-message failure
//! counts and captures every attempt for assertion in tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use courier_core::{CourierError, MessageId, QueuedMessage, Transport};

/// A scripted transport for testing.
///
/// By default every delivery succeeds. `failing_attempts(n)` makes the first
/// `n` attempts fail per message; `always_failing()` never succeeds. Every
/// attempt and every successful delivery is recorded.
pub struct MockTransport {
    /// Per-message failed attempts before success; `None` fails forever.
    fail_first: Option<u32>,
    /// Simulated transport latency per attempt.
    latency: Option<std::time::Duration>,
    attempts: Mutex<HashMap<MessageId, u32>>,
    attempt_log: Mutex<Vec<MessageId>>,
    delivered: Mutex<Vec<QueuedMessage>>,
}

impl MockTransport {
    /// A transport that always succeeds.
    pub fn new() -> Self {
        Self::with_fail_first(Some(0))
    }

    /// A transport where the first `n` attempts per message fail, then
    /// attempts succeed.
    pub fn failing_attempts(n: u32) -> Self {
        Self::with_fail_first(Some(n))
    }

    /// A transport that never succeeds.
    pub fn always_failing() -> Self {
        Self::with_fail_first(None)
    }

    fn with_fail_first(fail_first: Option<u32>) -> Self {
        Self {
            fail_first,
            latency: None,
            attempts: Mutex::new(HashMap::new()),
            attempt_log: Mutex::new(Vec::new()),
            delivered: Mutex::new(Vec::new()),
        }
    }

    /// Make every attempt take `latency` before resolving. Useful for
    /// observing in-flight state.
    pub fn with_latency(mut self, latency: std::time::Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of attempts made for one message.
    pub async fn attempt_count(&self, id: &MessageId) -> u32 {
        self.attempts.lock().await.get(id).copied().unwrap_or(0)
    }

    /// Total attempts across all messages.
    pub async fn total_attempts(&self) -> usize {
        self.attempt_log.lock().await.len()
    }

    /// Every attempted message id, in attempt order.
    pub async fn attempted_ids(&self) -> Vec<MessageId> {
        self.attempt_log.lock().await.clone()
    }

    /// Ids of successfully delivered messages, in delivery order.
    pub async fn delivered_ids(&self) -> Vec<MessageId> {
        self.delivered
            .lock()
            .await
            .iter()
            .map(|m| m.id.clone())
            .collect()
    }

    /// Successfully delivered message records.
    pub async fn delivered_messages(&self) -> Vec<QueuedMessage> {
        self.delivered.lock().await.clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn deliver(&self, message: &QueuedMessage) -> Result<(), CourierError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let attempt = {
            let mut attempts = self.attempts.lock().await;
            let counter = attempts.entry(message.id.clone()).or_insert(0);
            *counter += 1;
            *counter
        };
        self.attempt_log.lock().await.push(message.id.clone());

        let fail = match self.fail_first {
            Some(n) => attempt <= n,
            None => true,
        };
        if fail {
            return Err(CourierError::transport(format!(
                "scripted failure on attempt {attempt}"
            )));
        }

        self.delivered.lock().await.push(message.clone());
        Ok(())
    }
}

/// Wrap a transport in `Arc<dyn Transport>` for injection.
pub fn arc_transport(transport: MockTransport) -> Arc<dyn Transport> {
    Arc::new(transport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::MessagePayload;

    fn message(text: &str) -> QueuedMessage {
        QueuedMessage::new(MessagePayload::text(text))
    }

    #[tokio::test]
    async fn default_transport_delivers_everything() {
        let transport = MockTransport::new();
        let msg = message("hello");
        transport.deliver(&msg).await.unwrap();
        assert_eq!(transport.delivered_ids().await, vec![msg.id.clone()]);
        assert_eq!(transport.attempt_count(&msg.id).await, 1);
    }

    #[tokio::test]
    async fn failing_attempts_succeeds_after_n_failures() {
        let transport = MockTransport::failing_attempts(2);
        let msg = message("retry me");

        assert!(transport.deliver(&msg).await.is_err());
        assert!(transport.deliver(&msg).await.is_err());
        assert!(transport.deliver(&msg).await.is_ok());
        assert_eq!(transport.attempt_count(&msg.id).await, 3);
    }

    #[tokio::test]
    async fn failure_scripting_is_per_message() {
        let transport = MockTransport::failing_attempts(1);
        let a = message("a");
        let b = message("b");

        assert!(transport.deliver(&a).await.is_err());
        // b gets its own failure budget, independent of a.
        assert!(transport.deliver(&b).await.is_err());
        assert!(transport.deliver(&a).await.is_ok());
        assert!(transport.deliver(&b).await.is_ok());
    }

    #[tokio::test]
    async fn always_failing_never_delivers() {
        let transport = MockTransport::always_failing();
        let msg = message("doomed");
        for _ in 0..5 {
            assert!(transport.deliver(&msg).await.is_err());
        }
        assert!(transport.delivered_ids().await.is_empty());
        assert_eq!(transport.total_attempts().await, 5);
    }
}
