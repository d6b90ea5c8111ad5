// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event bus for the Courier delivery queue.
//!
//! UI consumers subscribe here to update visible message status (spinner,
//! checkmark, retry badge). Delivery is synchronous and in registration
//! order; listener failures are isolated from each other and from the queue.

pub mod bus;
pub mod event;

pub use bus::{EventBus, Subscription};
pub use event::QueueEvent;
