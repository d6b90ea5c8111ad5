// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Courier delivery queue.
//!
//! This crate provides the message and status types, the workspace error
//! type, and the [`Transport`] seam through which the embedding application
//! supplies the actual network send.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::CourierError;
pub use traits::Transport;
pub use types::{
    DeliveryStatus, MessageId, MessagePayload, QueueStatus, QueuedMessage, SendOutcome,
};
