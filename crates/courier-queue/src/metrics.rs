// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade so any recorder (Prometheus, statsd, etc.)
//! can collect these metrics.

use metrics::describe_counter;

/// Register all Courier metric descriptions.
///
/// Called once at startup after the recorder is installed.
pub fn register_metrics() {
    describe_counter!("courier_messages_enqueued_total", "Messages enqueued");
    describe_counter!(
        "courier_messages_sent_total",
        "Messages accepted by the transport"
    );
    describe_counter!("courier_retries_total", "Retry attempts scheduled");
    describe_counter!(
        "courier_messages_failed_total",
        "Messages that exhausted all retries"
    );
}

pub(crate) fn record_enqueued() {
    metrics::counter!("courier_messages_enqueued_total").increment(1);
}

pub(crate) fn record_sent() {
    metrics::counter!("courier_messages_sent_total").increment(1);
}

pub(crate) fn record_retry() {
    metrics::counter!("courier_retries_total").increment(1);
}

pub(crate) fn record_failed() {
    metrics::counter!("courier_messages_failed_total").increment(1);
}
