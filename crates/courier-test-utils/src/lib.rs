// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Courier integration tests.

pub mod mock_transport;
pub mod recording;

pub use mock_transport::{arc_transport, MockTransport};
pub use recording::RecordingListener;

/// Install a test tracing subscriber honoring `RUST_LOG`.
///
/// Safe to call from multiple tests; only the first call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}
