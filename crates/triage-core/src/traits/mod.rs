// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits implemented outside the core crate.

pub mod inference;

pub use inference::ZeroShotInference;
