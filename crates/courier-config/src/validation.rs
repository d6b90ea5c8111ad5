// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as nonzero delays and ordering between backoff bounds.

use crate::diagnostic::ConfigError;
use crate::model::CourierConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &CourierConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let queue = &config.queue;

    if queue.max_retries < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "queue.max_retries must be at least 1, got {}",
                queue.max_retries
            ),
        });
    }

    if queue.base_delay_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "queue.base_delay_ms must be nonzero".to_string(),
        });
    }

    if queue.max_delay_ms < queue.base_delay_ms {
        errors.push(ConfigError::Validation {
            message: format!(
                "queue.max_delay_ms ({}) must not be below queue.base_delay_ms ({})",
                queue.max_delay_ms, queue.base_delay_ms
            ),
        });
    }

    if queue.send_timeout_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "queue.send_timeout_ms must be nonzero".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
