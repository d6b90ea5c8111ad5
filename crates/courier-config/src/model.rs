// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Courier delivery queue.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level Courier configuration.
///
/// Loaded from TOML following the XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CourierConfig {
    /// Delivery queue and retry behavior.
    #[serde(default)]
    pub queue: QueueConfig,
}

/// Delivery queue and retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QueueConfig {
    /// Failed send attempts allowed per message before it is marked failed.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff delay before the first retry, in milliseconds. Doubles on
    /// each subsequent failure.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Ceiling on the exponential backoff delay, in milliseconds.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Pause between consecutive successful sends during a drain pass, in
    /// milliseconds. Keeps a burst of queued messages from saturating the
    /// transport.
    #[serde(default = "default_inter_message_pause_ms")]
    pub inter_message_pause_ms: u64,

    /// Deadline for a single send attempt, in milliseconds. An attempt that
    /// exceeds it counts as one transient failure.
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            inter_message_pause_ms: default_inter_message_pause_ms(),
            send_timeout_ms: default_send_timeout_ms(),
        }
    }
}

impl QueueConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    pub fn inter_message_pause(&self) -> Duration {
        Duration::from_millis(self.inter_message_pause_ms)
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30_000
}

fn default_inter_message_pause_ms() -> u64 {
    100
}

fn default_send_timeout_ms() -> u64 {
    30_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = QueueConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.base_delay_ms, 1000);
        assert_eq!(config.max_delay_ms, 30_000);
        assert_eq!(config.inter_message_pause_ms, 100);
        assert_eq!(config.send_timeout_ms, 30_000);
    }

    #[test]
    fn duration_accessors_convert_millis() {
        let config = QueueConfig::default();
        assert_eq!(config.base_delay(), Duration::from_secs(1));
        assert_eq!(config.inter_message_pause(), Duration::from_millis(100));
        assert_eq!(config.send_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml_str = r#"
[queue]
max_retries = 5
max_retrys = 5
"#;
        assert!(toml::from_str::<CourierConfig>(toml_str).is_err());
    }

    #[test]
    fn partial_section_fills_defaults() {
        let toml_str = r#"
[queue]
max_retries = 5
"#;
        let config: CourierConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.queue.max_retries, 5);
        assert_eq!(config.queue.base_delay_ms, 1000);
    }
}
