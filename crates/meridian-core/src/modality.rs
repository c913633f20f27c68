// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concrete, data-only modality plugins.
//!
//! A [`StaticModality`] is a plain record: a [`ModalityDefinition`] plus
//! optional override functions. Everything else comes from the default
//! behavior in [`crate::defaults`] via the [`ModalityPlugin`] trait.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::MeridianError;
use crate::traits::ModalityPlugin;
use crate::types::{
    ComparisonMetrics, Contraindications, EffectivenessEntry, ModalityMetadata, Protocol,
    Technique, UiBindings,
};

/// All data describing one treatment modality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalityDefinition {
    pub metadata: ModalityMetadata,
    #[serde(default)]
    pub protocols: Vec<Protocol>,
    #[serde(default)]
    pub techniques: Vec<Technique>,
    #[serde(default)]
    pub effectiveness: Vec<EffectivenessEntry>,
    #[serde(default)]
    pub contraindications: Contraindications,
    pub ui: UiBindings,
}

impl ModalityDefinition {
    /// Parse a definition from a JSON document in the shared data shape.
    ///
    /// Only the shape is checked here; semantic validation happens when the
    /// plugin is initialized by the loader.
    pub fn from_json(json: &str) -> Result<Self, MeridianError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Replaces the default comparison metrics wholesale.
pub type ComparisonOverride = Arc<dyn Fn(&ModalityDefinition) -> ComparisonMetrics + Send + Sync>;

/// A modality declared as data, with optional overrides.
#[derive(Clone)]
pub struct StaticModality {
    definition: ModalityDefinition,
    comparison_override: Option<ComparisonOverride>,
    synonyms: Vec<String>,
}

impl StaticModality {
    pub fn new(definition: ModalityDefinition) -> Self {
        Self {
            definition,
            comparison_override: None,
            synonyms: Vec::new(),
        }
    }

    /// Use curated comparison metrics instead of the synthesized defaults.
    pub fn with_comparison(self, metrics: ComparisonMetrics) -> Self {
        self.with_comparison_override(move |_| metrics.clone())
    }

    /// Compute comparison metrics with a custom function.
    pub fn with_comparison_override<F>(mut self, f: F) -> Self
    where
        F: Fn(&ModalityDefinition) -> ComparisonMetrics + Send + Sync + 'static,
    {
        self.comparison_override = Some(Arc::new(f));
        self
    }

    /// Append domain synonyms to the default search terms.
    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms.extend(synonyms.into_iter().map(Into::into));
        self
    }

    pub fn into_definition(self) -> ModalityDefinition {
        self.definition
    }
}

impl fmt::Debug for StaticModality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticModality")
            .field("id", &self.definition.metadata.id)
            .field("comparison_override", &self.comparison_override.is_some())
            .field("synonyms", &self.synonyms)
            .finish()
    }
}

#[async_trait]
impl ModalityPlugin for StaticModality {
    fn definition(&self) -> &ModalityDefinition {
        &self.definition
    }

    fn comparison_data(&self) -> ComparisonMetrics {
        match &self.comparison_override {
            Some(f) => f(&self.definition),
            None => crate::defaults::comparison_metrics(&self.definition),
        }
    }

    fn search_terms(&self) -> Vec<String> {
        let mut terms = crate::defaults::search_terms(&self.definition);
        for synonym in &self.synonyms {
            if !terms.contains(synonym) {
                terms.push(synonym.clone());
            }
        }
        terms
    }
}
