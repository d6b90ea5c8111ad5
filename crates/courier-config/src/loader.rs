// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./courier.toml` > `~/.config/courier/courier.toml`
//! > `/etc/courier/courier.toml` with environment variable overrides via the
//! `COURIER_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::CourierConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/courier/courier.toml` (system-wide)
/// 3. `~/.config/courier/courier.toml` (user XDG config)
/// 4. `./courier.toml` (local directory)
/// 5. `COURIER_*` environment variables
pub fn load_config() -> Result<CourierConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CourierConfig::default()))
        .merge(Toml::file("/etc/courier/courier.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("courier/courier.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("courier.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from an inline TOML string (no XDG lookup).
///
/// Used for testing and embedders that manage their own config files.
pub fn load_config_from_str(toml_content: &str) -> Result<CourierConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CourierConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CourierConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CourierConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `COURIER_QUEUE_MAX_RETRIES` must map to
/// `queue.max_retries`, not `queue.max.retries`.
fn env_provider() -> Env {
    Env::prefixed("COURIER_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: COURIER_QUEUE_MAX_RETRIES -> "queue_max_retries"
        key.as_str().replacen("queue_", "queue.", 1).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[queue]
max_retries = 7
base_delay_ms = 250
"#,
        )
        .unwrap();
        assert_eq!(config.queue.max_retries, 7);
        assert_eq!(config.queue.base_delay_ms, 250);
        // Untouched keys keep compiled defaults.
        assert_eq!(config.queue.max_delay_ms, 30_000);
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.queue.max_retries, 3);
    }

    #[test]
    fn unknown_key_fails_extraction() {
        let result = load_config_from_str(
            r#"
[queue]
max_retrys = 5
"#,
        );
        assert!(result.is_err());
    }
}
