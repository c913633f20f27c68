// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture builder for modality definitions.
//!
//! `ModalityBuilder` starts from a minimal valid definition and lets a test
//! add only the protocols, techniques, and safety rules it cares about.

use std::sync::Arc;

use meridian_core::{
    AgeRestrictions, Contraindications, EffectivenessEntry, EvidenceLevel, Intensity,
    ModalityDefinition, ModalityMetadata, ModalityPlugin, PregnancyPolicy, Protocol, SkillLevel,
    StaticModality, Step, StepType, Technique, UiBindings,
};

/// Builds [`ModalityDefinition`]s for tests.
#[derive(Debug, Clone)]
pub struct ModalityBuilder {
    definition: ModalityDefinition,
}

impl ModalityBuilder {
    /// A valid, empty modality with the given id.
    pub fn new(id: &str) -> Self {
        let mut prefix = id.to_string();
        if let Some(first) = prefix.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        Self {
            definition: ModalityDefinition {
                metadata: ModalityMetadata {
                    id: id.to_string(),
                    name: prefix.clone(),
                    display_name: prefix.clone(),
                    icon: "circle".to_string(),
                    version: "1.0.0".to_string(),
                    skill_level: SkillLevel::Beginner,
                    equipment_required: false,
                    self_administered: true,
                },
                protocols: Vec::new(),
                techniques: Vec::new(),
                effectiveness: Vec::new(),
                contraindications: Contraindications::default(),
                ui: UiBindings::with_prefix(&prefix),
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.definition.metadata.name = name.to_string();
        self
    }

    pub fn display_name(mut self, display_name: &str) -> Self {
        self.definition.metadata.display_name = display_name.to_string();
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.definition.metadata.version = version.to_string();
        self
    }

    pub fn skill_level(mut self, level: SkillLevel) -> Self {
        self.definition.metadata.skill_level = level;
        self
    }

    pub fn equipment_required(mut self, required: bool) -> Self {
        self.definition.metadata.equipment_required = required;
        self
    }

    /// Add a protocol for `indication` with a single treatment step.
    pub fn protocol(self, indication: &str) -> Self {
        self.protocol_using(indication, &[])
    }

    /// Add a protocol for `indication` whose single step uses `techniques`.
    pub fn protocol_using(mut self, indication: &str, techniques: &[&str]) -> Self {
        let id = self.definition.metadata.id.clone();
        let index = self.definition.protocols.len() + 1;
        self.definition.protocols.push(Protocol {
            id: format!("{id}-p{index}"),
            modality_id: id.clone(),
            indication: indication.to_string(),
            name: format!("{indication} protocol"),
            description: format!("Protocol {index} for {indication}"),
            steps: vec![Step {
                id: format!("{id}-p{index}-s1"),
                order: 1,
                step_type: StepType::Treatment,
                title: "Treat".to_string(),
                description: "Apply the treatment".to_string(),
                duration: "5 minutes".to_string(),
                points: Vec::new(),
                techniques: techniques.iter().map(|t| (*t).to_string()).collect(),
                equipment: Vec::new(),
                notes: None,
            }],
            duration: "15 minutes".to_string(),
            frequency: "Daily".to_string(),
            difficulty: "easy".to_string(),
            contraindications: Vec::new(),
            precautions: Vec::new(),
            expected_outcomes: Vec::new(),
            clinical_notes: String::new(),
        });
        self
    }

    pub fn technique(mut self, technique_id: &str) -> Self {
        self.definition.techniques.push(Technique {
            id: technique_id.to_string(),
            modality_id: self.definition.metadata.id.clone(),
            name: format!("{technique_id} technique"),
            description: String::new(),
            instructions: vec!["Apply".to_string()],
            duration: "2 minutes".to_string(),
            intensity: Intensity::Moderate,
            equipment: Vec::new(),
            contraindications: Vec::new(),
        });
        self
    }

    pub fn effectiveness(mut self, indication: &str, score: u8) -> Self {
        self.definition.effectiveness.push(EffectivenessEntry {
            indication: indication.to_string(),
            effectiveness_score: score,
            evidence_level: EvidenceLevel::Moderate,
            references: Vec::new(),
            clinical_notes: None,
        });
        self
    }

    pub fn absolute(mut self, contraindication: &str) -> Self {
        self.definition
            .contraindications
            .absolute
            .push(contraindication.to_string());
        self
    }

    pub fn relative(mut self, contraindication: &str) -> Self {
        self.definition
            .contraindications
            .relative
            .push(contraindication.to_string());
        self
    }

    pub fn pregnancy(mut self, policy: PregnancyPolicy) -> Self {
        self.definition.contraindications.pregnancy = policy;
        self
    }

    pub fn ages(mut self, min_age: Option<u32>, max_age: Option<u32>) -> Self {
        self.definition.contraindications.age_restrictions = Some(AgeRestrictions {
            min_age,
            max_age,
            special_considerations: None,
        });
        self
    }

    pub fn build(self) -> ModalityDefinition {
        self.definition
    }

    /// Wrap the definition in a [`StaticModality`] using the default behavior.
    pub fn build_plugin(self) -> Arc<dyn ModalityPlugin> {
        Arc::new(StaticModality::new(self.definition))
    }
}
