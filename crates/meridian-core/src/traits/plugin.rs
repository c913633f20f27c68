// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plugin contract every treatment modality satisfies.

use async_trait::async_trait;

use crate::defaults;
use crate::error::MeridianError;
use crate::modality::ModalityDefinition;
use crate::types::{
    ComparisonMetrics, Contraindications, EffectivenessEntry, ModalityMetadata, NavigationItem,
    PatientData, Protocol, RouteDefinition, SafetyAssessment, Technique, UiBindings,
};

/// A registered treatment modality.
///
/// Implementors only have to supply [`definition`](Self::definition); every
/// derived capability has a default in [`crate::defaults`] and may be
/// overridden individually. Overrides replace the default result wholesale.
#[async_trait]
pub trait ModalityPlugin: Send + Sync + 'static {
    /// The data bundle backing this plugin.
    fn definition(&self) -> &ModalityDefinition;

    /// Unique plugin id (the registry key).
    fn id(&self) -> &str {
        &self.definition().metadata.id
    }

    fn metadata(&self) -> &ModalityMetadata {
        &self.definition().metadata
    }

    fn protocols(&self) -> &[Protocol] {
        &self.definition().protocols
    }

    fn techniques(&self) -> &[Technique] {
        &self.definition().techniques
    }

    fn effectiveness(&self) -> &[EffectivenessEntry] {
        &self.definition().effectiveness
    }

    fn contraindications(&self) -> &Contraindications {
        &self.definition().contraindications
    }

    fn ui_bindings(&self) -> &UiBindings {
        &self.definition().ui
    }

    /// Validates the plugin before registration.
    ///
    /// Awaited once per plugin by the loader; an error keeps the plugin out
    /// of the registry without affecting other plugins.
    async fn initialize(&self) -> Result<(), MeridianError> {
        defaults::validate_definition(self.definition())
    }

    /// Protocols whose indication matches `indication` (see
    /// [`defaults::indication_matches`]).
    fn protocols_for_indication(&self, indication: &str) -> Vec<&Protocol> {
        defaults::protocols_for_indication(self.definition(), indication)
    }

    /// Techniques referenced by the steps of matching protocols.
    fn techniques_for_indication(&self, indication: &str) -> Vec<&Technique> {
        defaults::techniques_for_indication(self.definition(), indication)
    }

    /// First effectiveness entry matching `indication`.
    fn effectiveness_for_indication(&self, indication: &str) -> Option<&EffectivenessEntry> {
        defaults::effectiveness_for_indication(self.definition(), indication)
    }

    /// Screens a patient against this modality's contraindications.
    fn validate_safety_for_patient(&self, patient: &PatientData) -> SafetyAssessment {
        defaults::validate_safety(self.definition(), patient)
    }

    /// Row for the cross-modality comparison table.
    fn comparison_data(&self) -> ComparisonMetrics {
        defaults::comparison_metrics(self.definition())
    }

    /// Routes this plugin contributes on its own.
    fn routes(&self) -> Vec<RouteDefinition> {
        defaults::routes(self.definition())
    }

    fn navigation(&self) -> NavigationItem {
        defaults::navigation(self.definition())
    }

    /// Terms this plugin can be found by.
    fn search_terms(&self) -> Vec<String> {
        defaults::search_terms(self.definition())
    }
}
