// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use meridian_core::{
    AgeRestrictions, Contraindications, EffectivenessEntry, EvidenceLevel, Intensity,
    ModalityDefinition, ModalityMetadata, PregnancyPolicy, Protocol, SkillLevel, StaticModality,
    StepType, Technique, UiBindings,
};

use super::{step, strings};

const ID: &str = "hydrotherapy";

/// Contrast and thermal water applications.
pub fn hydrotherapy() -> StaticModality {
    StaticModality::new(definition()).with_synonyms(["contrast bath", "cold plunge", "balneotherapy"])
}

fn definition() -> ModalityDefinition {
    ModalityDefinition {
        metadata: ModalityMetadata {
            id: ID.to_string(),
            name: "Hydrotherapy".to_string(),
            display_name: "Hydrotherapy".to_string(),
            icon: "droplet".to_string(),
            version: "0.9.0".to_string(),
            skill_level: SkillLevel::Advanced,
            equipment_required: true,
            self_administered: true,
        },
        protocols: vec![
            Protocol {
                id: "hydro-muscle-soreness".to_string(),
                modality_id: ID.to_string(),
                indication: "muscle_soreness".to_string(),
                name: "Contrast Recovery".to_string(),
                description: "Alternating hot and cold immersion after exertion".to_string(),
                steps: vec![
                    {
                        let mut s = step(
                            "hyd-ms-1",
                            1,
                            StepType::Preparation,
                            "Prepare baths",
                            "Fill one tub at 38-40C and one at 10-15C",
                            "5 minutes",
                            &[],
                        );
                        s.equipment = strings(&["two tubs", "thermometer"]);
                        s
                    },
                    step(
                        "hyd-ms-2",
                        2,
                        StepType::Treatment,
                        "Alternate",
                        "Three minutes warm then one minute cold, three rounds",
                        "12 minutes",
                        &["hyd-contrast-immersion"],
                    ),
                    step(
                        "hyd-ms-3",
                        3,
                        StepType::Assessment,
                        "Check skin",
                        "Look for blanching or numbness before finishing",
                        "1 minute",
                        &[],
                    ),
                ],
                duration: "20 minutes".to_string(),
                frequency: "After training sessions".to_string(),
                difficulty: "moderate".to_string(),
                contraindications: strings(&["cold urticaria"]),
                precautions: strings(&["End on cold unless the patient feels chilled"]),
                expected_outcomes: strings(&["Reduced delayed-onset soreness"]),
                clinical_notes: String::new(),
            },
            Protocol {
                id: "hydro-circulation".to_string(),
                modality_id: ID.to_string(),
                indication: "poor_circulation".to_string(),
                name: "Warm Foot Soak".to_string(),
                description: "Graduated warm soak for cold extremities".to_string(),
                steps: vec![step(
                    "hyd-pc-1",
                    1,
                    StepType::Treatment,
                    "Soak",
                    "Immerse feet, raising temperature gradually",
                    "15 minutes",
                    &["hyd-warm-soak"],
                )],
                duration: "15 minutes".to_string(),
                frequency: "Daily".to_string(),
                difficulty: "easy".to_string(),
                contraindications: strings(&["peripheral neuropathy"]),
                precautions: Vec::new(),
                expected_outcomes: strings(&["Warmer extremities"]),
                clinical_notes: String::new(),
            },
        ],
        techniques: vec![
            Technique {
                id: "hyd-contrast-immersion".to_string(),
                modality_id: ID.to_string(),
                name: "Contrast Immersion".to_string(),
                description: "Alternating warm and cold water immersion".to_string(),
                instructions: strings(&["Immerse to mid-calf", "Time each phase"]),
                duration: "12 minutes".to_string(),
                intensity: Intensity::Variable,
                equipment: strings(&["two tubs"]),
                contraindications: strings(&["Raynaud's"]),
            },
            Technique {
                id: "hyd-warm-soak".to_string(),
                modality_id: ID.to_string(),
                name: "Warm Soak".to_string(),
                description: "Sustained immersion in warm water".to_string(),
                instructions: strings(&["Start at 35C", "Raise slowly to 40C"]),
                duration: "15 minutes".to_string(),
                intensity: Intensity::Light,
                equipment: strings(&["basin"]),
                contraindications: Vec::new(),
            },
        ],
        effectiveness: vec![
            EffectivenessEntry {
                indication: "muscle_soreness".to_string(),
                effectiveness_score: 68,
                evidence_level: EvidenceLevel::Moderate,
                references: Vec::new(),
                clinical_notes: None,
            },
            EffectivenessEntry {
                indication: "poor_circulation".to_string(),
                effectiveness_score: 55,
                evidence_level: EvidenceLevel::Low,
                references: Vec::new(),
                clinical_notes: None,
            },
        ],
        contraindications: Contraindications {
            absolute: strings(&["heart failure", "open wound", "hypothermia"]),
            relative: strings(&["diabetes", "hypertension"]),
            pregnancy: PregnancyPolicy::Avoid,
            age_restrictions: Some(AgeRestrictions {
                min_age: Some(12),
                max_age: Some(75),
                special_considerations: Some("Shorten cold phases for older adults".to_string()),
            }),
            medications: strings(&["beta blocker"]),
            conditions: strings(&["peripheral neuropathy"]),
        },
        ui: UiBindings::with_prefix("Hydrotherapy"),
    }
}
