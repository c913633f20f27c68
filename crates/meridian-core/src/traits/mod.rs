// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the Meridian plugin architecture.

pub mod plugin;

pub use plugin::ModalityPlugin;
