// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Courier delivery queue.

use thiserror::Error;

/// The primary error type used across the Courier workspace.
#[derive(Debug, Error)]
pub enum CourierError {
    /// Configuration errors (invalid TOML, bad retry/backoff values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport errors reported by the injected sender (network failure,
    /// rejected payload, rate limiting).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A send attempt exceeded the configured per-send deadline.
    #[error("send attempt timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// API contract violation by the embedding application.
    #[error("contract violation: {0}")]
    Contract(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CourierError {
    /// Shorthand for a transport error with only a message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_shorthand_has_no_source() {
        let err = CourierError::transport("connection reset");
        match err {
            CourierError::Transport { message, source } => {
                assert_eq!(message, "connection reset");
                assert!(source.is_none());
            }
            other => panic!("expected Transport, got {other:?}"),
        }
    }

    #[test]
    fn timeout_displays_duration() {
        let err = CourierError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        assert!(err.to_string().contains("30s"));
    }
}
