// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory queue state.
//!
//! One struct holds everything the queue mutates: the ordered store, the
//! single-flight drain flag, the in-flight marker, outstanding retry timers,
//! and the generation counter. All of it lives behind one `tokio::sync::Mutex`
//! in [`DeliveryQueue`](crate::DeliveryQueue), so enqueue, pop, reinsert, and
//! timer callbacks are mutually exclusive by construction.
//!
//! Queue contents are volatile; nothing survives a process restart.

use std::collections::{HashMap, VecDeque};

use courier_core::{MessageId, QueueStatus, QueuedMessage};

use crate::scheduler::ScheduledTimer;

pub(crate) struct QueueState {
    /// Messages waiting for the next send attempt, head first.
    pub queue: VecDeque<QueuedMessage>,
    /// Single-flight guard: true while a drain pass is active.
    pub draining: bool,
    /// True while one send attempt is in flight.
    pub in_flight: bool,
    /// Bumped by `clear()`; work tagged with an older generation discards
    /// its result instead of mutating cleared state.
    pub generation: u64,
    /// Armed backoff timers, keyed by the message awaiting reinsertion.
    pub timers: HashMap<MessageId, ScheduledTimer>,
}

impl QueueState {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            draining: false,
            in_flight: false,
            generation: 0,
            timers: HashMap::new(),
        }
    }

    /// Point-in-time counts. Requires no draining and no allocation.
    pub fn snapshot(&self) -> QueueStatus {
        let queued = self.queue.len();
        let sending = usize::from(self.in_flight);
        let retrying = self.timers.len();
        QueueStatus {
            total: queued + sending + retrying,
            queued,
            sending,
            retrying,
            processing: self.draining,
        }
    }

    /// Discard every pending message and cancel every outstanding retry
    /// timer, bumping the generation so stale timers and in-flight sends
    /// cannot resurrect discarded messages. Returns the number removed.
    pub fn clear_pending(&mut self) -> usize {
        self.generation += 1;
        let mut removed = self.queue.len();
        self.queue.clear();
        for (_, timer) in self.timers.drain() {
            timer.cancel();
            removed += 1;
        }
        removed
    }
}
