// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reliable outbound message delivery queue.
//!
//! A user-composed message handed to [`DeliveryQueue::enqueue`] is
//! guaranteed to be handed to the injected [`Transport`] eventually, despite
//! transient send failures, without duplication or silent loss, up to the
//! configured retry limit. Retries back off exponentially with a bounded
//! ceiling; queue lifecycle is surfaced through `courier-bus` events.
//!
//! [`Transport`]: courier_core::Transport

pub mod backoff;
pub mod metrics;
pub mod queue;
pub mod scheduler;
mod store;

pub use backoff::backoff_delay;
pub use queue::DeliveryQueue;
pub use scheduler::{ScheduledTimer, Scheduler, TimerCallback, TokioScheduler};
