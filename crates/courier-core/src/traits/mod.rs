// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams consumed from external collaborators.

pub mod transport;

pub use transport::Transport;
