// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Meridian treatment-modality framework.
//!
//! This crate defines the plugin contract ([`ModalityPlugin`]), the shared
//! default behavior every plugin inherits, the data model, and the error
//! type used across the workspace. Concrete modalities are plain data
//! ([`StaticModality`]) and only override what differs from the defaults.

pub mod defaults;
pub mod error;
pub mod modality;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MeridianError;
pub use modality::{ComparisonOverride, ModalityDefinition, StaticModality};
pub use traits::ModalityPlugin;
pub use types::{
    AgeRestrictions, ComparisonMetrics, Contraindications, EffectivenessEntry, EvidenceLevel,
    Intensity, ModalityMetadata, NavigationItem, PatientData, PregnancyPolicy, Protocol,
    RouteDefinition, SafetyAssessment, SkillLevel, Step, StepType, Technique, UiBinding,
    UiBindings,
};
