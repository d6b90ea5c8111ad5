// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time abstraction for retry timers.
//!
//! The retry controller arms one-shot timers through the [`Scheduler`] trait
//! rather than calling `tokio::time::sleep` directly, so tests can substitute
//! a manual scheduler, and so every outstanding timer has a cancelable handle
//! that `clear()` can reach.

use std::time::Duration;

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

/// Deferred work armed by [`Scheduler::after`].
pub type TimerCallback = BoxFuture<'static, ()>;

/// One-shot timer source.
pub trait Scheduler: Send + Sync {
    /// Run `callback` after `delay`, unless the returned handle is cancelled
    /// first.
    fn after(&self, delay: Duration, callback: TimerCallback) -> ScheduledTimer;
}

/// Cancelable handle for an armed timer.
///
/// Dropping the handle does NOT cancel the timer; cancellation is always
/// explicit, so a handle can be removed from tracking once its timer fires.
pub struct ScheduledTimer {
    token: CancellationToken,
}

impl ScheduledTimer {
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Prevent the callback from running, if it has not started yet.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Production scheduler backed by the tokio timer wheel.
///
/// Under `#[tokio::test(start_paused = true)]` the runtime auto-advances
/// these sleeps, so backoff tests run deterministically without wall-clock
/// waits.
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn after(&self, delay: Duration, callback: TimerCallback) -> ScheduledTimer {
        let token = CancellationToken::new();
        let fired = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = fired.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    callback.await;
                }
            }
        });
        ScheduledTimer::new(token)
    }
}
