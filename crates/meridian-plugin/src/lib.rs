// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry, loader, and built-in modality catalog.
//!
//! The registry holds the set of treatment modalities the application knows
//! about. The loader populates it once at startup from the built-in catalog,
//! isolating plugins that fail validation, and signals readiness when done.

pub mod catalog;
pub mod loader;
pub mod registry;

pub use catalog::builtin_catalog;
pub use loader::{LoadFailure, LoadReport, PluginLoader, Readiness};
pub use registry::{ComparisonRow, PluginRegistry, RegistryStats};
