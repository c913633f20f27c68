// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Meridian integration tests.
//!
//! Provides fixture builders, mock plugins, and test harness infrastructure
//! for fast, deterministic tests of the registry, loader, and composer.
//!
//! # Components
//!
//! - [`ModalityBuilder`] - Fixture builder for modality definitions
//! - [`MockModality`] - Plugin with scripted (delayed or failing) initialization
//! - [`TestHarness`] - Registry, loader, and composer wired together

pub mod fixture;
pub mod harness;
pub mod mock_plugin;

pub use fixture::ModalityBuilder;
pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_plugin::MockModality;
