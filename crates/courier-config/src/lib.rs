// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Courier delivery queue.
//!
//! TOML models with strict key checking, a figment-based layered loader
//! (defaults -> system -> XDG -> local -> env), diagnostic conversion with
//! typo suggestions, and semantic validation.

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{figment_to_config_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{CourierConfig, QueueConfig};
pub use validation::validate_config;
