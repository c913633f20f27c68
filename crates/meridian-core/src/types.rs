// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data model shared by modality plugins, the registry, and the composer.
//!
//! Field names serialize in camelCase so data providers can hand over JSON
//! documents in the same shape regardless of where the data came from.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How much practice a modality demands before it can be applied well.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// Ease-of-use score used by the default comparison metrics.
    pub fn ease_of_use(self) -> u8 {
        match self {
            SkillLevel::Beginner => 90,
            SkillLevel::Intermediate => 70,
            SkillLevel::Advanced => 50,
        }
    }
}

/// Phase of a protocol a step belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StepType {
    Preparation,
    Treatment,
    Assessment,
    Evaluation,
}

/// Pressure or effort a technique is applied with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Intensity {
    Light,
    Moderate,
    Firm,
    Variable,
}

/// Strength of the evidence behind an effectiveness score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EvidenceLevel {
    Low,
    Moderate,
    High,
}

/// Policy for applying a modality during pregnancy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PregnancyPolicy {
    Safe,
    Caution,
    Avoid,
}

/// Identity and classification of a modality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalityMetadata {
    /// Unique plugin id, also the first route segment (e.g., "acupressure").
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub icon: String,
    /// Semantic version string of the modality dataset.
    pub version: String,
    pub skill_level: SkillLevel,
    pub equipment_required: bool,
    pub self_administered: bool,
}

/// A single ordered step within a protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    /// 1-based position within the protocol.
    pub order: u32,
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub title: String,
    pub description: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<String>,
    /// Ids of techniques (from the owning modality) used in this step.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub techniques: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipment: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// An ordered treatment procedure for one indication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Protocol {
    pub id: String,
    /// Must equal the owning modality's id.
    pub modality_id: String,
    /// Free-text key naming the condition addressed (e.g., "tension_headache").
    pub indication: String,
    pub name: String,
    pub description: String,
    pub steps: Vec<Step>,
    pub duration: String,
    pub frequency: String,
    pub difficulty: String,
    #[serde(default)]
    pub contraindications: Vec<String>,
    #[serde(default)]
    pub precautions: Vec<String>,
    #[serde(default)]
    pub expected_outcomes: Vec<String>,
    #[serde(default)]
    pub clinical_notes: String,
}

/// A reusable manual technique referenced by protocol steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technique {
    pub id: String,
    pub modality_id: String,
    pub name: String,
    pub description: String,
    pub instructions: Vec<String>,
    pub duration: String,
    pub intensity: Intensity,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipment: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contraindications: Vec<String>,
}

/// Effectiveness evidence for one indication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectivenessEntry {
    pub indication: String,
    /// Score in `0..=100`.
    pub effectiveness_score: u8,
    pub evidence_level: EvidenceLevel,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_notes: Option<String>,
}

/// Age bounds for applying a modality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeRestrictions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_considerations: Option<String>,
}

/// Safety rules for a modality, merged by the default safety validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contraindications {
    /// Any match makes the modality unsafe for the patient.
    #[serde(default)]
    pub absolute: Vec<String>,
    /// A match yields a warning but does not change the verdict.
    #[serde(default)]
    pub relative: Vec<String>,
    pub pregnancy: PregnancyPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_restrictions: Option<AgeRestrictions>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
}

impl Default for Contraindications {
    fn default() -> Self {
        Self {
            absolute: Vec::new(),
            relative: Vec::new(),
            pregnancy: PregnancyPolicy::Safe,
            age_restrictions: None,
            medications: Vec::new(),
            conditions: Vec::new(),
        }
    }
}

/// Opaque reference to a presentation component.
///
/// The registry and composer never inspect a binding; they only forward it
/// into route, card, and comparison structures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UiBinding(pub String);

impl UiBinding {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The five named UI bindings every modality supplies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiBindings {
    pub protocol_page: UiBinding,
    pub protocol_card: UiBinding,
    pub techniques_list: UiBinding,
    pub safety_warnings: UiBinding,
    pub comparison_metrics: UiBinding,
}

impl UiBindings {
    /// Conventional bindings derived from a component prefix, e.g. `Acupressure`
    /// yields `AcupressureProtocolPage`, `AcupressureProtocolCard`, ...
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            protocol_page: UiBinding(format!("{prefix}ProtocolPage")),
            protocol_card: UiBinding(format!("{prefix}ProtocolCard")),
            techniques_list: UiBinding(format!("{prefix}TechniquesList")),
            safety_warnings: UiBinding(format!("{prefix}SafetyWarnings")),
            comparison_metrics: UiBinding(format!("{prefix}ComparisonMetrics")),
        }
    }
}

/// Patient facts screened against a modality's contraindications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientData {
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub pregnancy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

/// Verdict of a safety validation. All warnings are collected; evaluation
/// does not stop at the first failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyAssessment {
    pub safe: bool,
    pub warnings: Vec<String>,
}

/// Metrics shown in the cross-modality comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonMetrics {
    pub duration: String,
    pub frequency: String,
    /// Mean effectiveness score in `0..=100`.
    pub effectiveness: f64,
    pub ease_of_use: u8,
    pub safety_profile: u8,
    pub cost: String,
    pub equipment: String,
}

/// A route a single plugin contributes on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    pub path: String,
    pub binding: UiBinding,
}

/// A navigation entry. Plugins leave `category` unset; the composer fills it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub name: String,
    pub path: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
