// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connectivity bridge for the Courier delivery queue.
//!
//! Offers the "smart send" entry point (direct delivery with queue fallback)
//! and turns offline-to-online signal edges into drain triggers.

pub mod bridge;

pub use bridge::ConnectivityBridge;
