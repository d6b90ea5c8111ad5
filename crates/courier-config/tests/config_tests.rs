// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for config loading from real files.

use courier_config::{
    figment_to_config_errors, load_config_from_path, load_config_from_str, validate_config,
    ConfigError,
};

#[test]
fn load_from_file_merges_over_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("courier.toml");
    std::fs::write(
        &path,
        r#"
[queue]
max_retries = 5
inter_message_pause_ms = 50
"#,
    )
    .unwrap();

    let config = load_config_from_path(&path).unwrap();
    assert_eq!(config.queue.max_retries, 5);
    assert_eq!(config.queue.inter_message_pause_ms, 50);
    assert_eq!(config.queue.base_delay_ms, 1000);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.toml");
    let config = load_config_from_path(&path).unwrap();
    assert_eq!(config.queue.max_retries, 3);
}

#[test]
fn typo_produces_suggestion_diagnostic() {
    let err = load_config_from_str(
        r#"
[queue]
max_retrys = 5
"#,
    )
    .unwrap_err();

    let errors = figment_to_config_errors(err);
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion, .. }
            if key == "max_retrys" && suggestion.as_deref() == Some("max_retries")
    )));
}

#[test]
fn wrong_type_produces_invalid_type_diagnostic() {
    let err = load_config_from_str(
        r#"
[queue]
max_retries = "three"
"#,
    )
    .unwrap_err();

    let errors = figment_to_config_errors(err);
    assert!(!errors.is_empty());
}
