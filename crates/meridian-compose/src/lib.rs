// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composition layer between the plugin registry and presentation code.
//!
//! [`DynamicComposer`] turns registered plugins into routes, navigation,
//! cards, and comparison tables. [`RegistryBinding`] gates consumers on the
//! loader's readiness signal and hands them snapshots.

pub mod bindings;
pub mod composer;

pub use bindings::{BindingSnapshot, RegistryBinding};
pub use composer::{
    ComparisonTableRow, DynamicComposer, ModalityCard, NAV_CATEGORY, RouteEntry, RouteProps,
    SafetyReportEntry,
};
