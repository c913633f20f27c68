// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use meridian_core::{
    ComparisonMetrics, Contraindications, EffectivenessEntry, EvidenceLevel, Intensity,
    ModalityDefinition, ModalityMetadata, PregnancyPolicy, Protocol, SkillLevel, StaticModality,
    StepType, Technique, UiBindings,
};

use super::{step, strings};

const ID: &str = "massage";

/// Therapeutic massage, with curated comparison metrics.
pub fn massage() -> StaticModality {
    StaticModality::new(definition())
        .with_comparison(ComparisonMetrics {
            duration: "30-60 minutes".to_string(),
            frequency: "1-2 times weekly".to_string(),
            effectiveness: 78.0,
            ease_of_use: 70,
            safety_profile: 85,
            cost: "Medium".to_string(),
            equipment: "Massage table or mat".to_string(),
        })
        .with_synonyms(["bodywork", "soft tissue therapy", "swedish"])
}

fn definition() -> ModalityDefinition {
    ModalityDefinition {
        metadata: ModalityMetadata {
            id: ID.to_string(),
            name: "Massage".to_string(),
            display_name: "Therapeutic Massage".to_string(),
            icon: "hands".to_string(),
            version: "1.1.0".to_string(),
            skill_level: SkillLevel::Intermediate,
            equipment_required: false,
            self_administered: false,
        },
        protocols: vec![
            Protocol {
                id: "massage-tension-headache".to_string(),
                modality_id: ID.to_string(),
                indication: "tension_headache".to_string(),
                name: "Neck and Shoulder Release".to_string(),
                description: "Release of the upper trapezius and suboccipitals".to_string(),
                steps: vec![
                    step(
                        "mas-th-1",
                        1,
                        StepType::Preparation,
                        "Warm up",
                        "Broad strokes across both shoulders",
                        "5 minutes",
                        &["mas-effleurage"],
                    ),
                    step(
                        "mas-th-2",
                        2,
                        StepType::Treatment,
                        "Knead",
                        "Knead the upper trapezius from neck to shoulder tip",
                        "10 minutes",
                        &["mas-petrissage"],
                    ),
                    step(
                        "mas-th-3",
                        3,
                        StepType::Evaluation,
                        "Range of motion",
                        "Check neck rotation and side bending",
                        "2 minutes",
                        &[],
                    ),
                ],
                duration: "30 minutes".to_string(),
                frequency: "Weekly".to_string(),
                difficulty: "moderate".to_string(),
                contraindications: Vec::new(),
                precautions: strings(&["Avoid direct pressure on the carotid area"]),
                expected_outcomes: strings(&["Reduced neck tension", "Fewer headache days"]),
                clinical_notes: String::new(),
            },
            Protocol {
                id: "massage-lower-back".to_string(),
                modality_id: ID.to_string(),
                indication: "lower_back_pain".to_string(),
                name: "Lower Back Relief".to_string(),
                description: "Paraspinal and gluteal work for non-specific low back pain"
                    .to_string(),
                steps: vec![
                    step(
                        "mas-lb-1",
                        1,
                        StepType::Preparation,
                        "Position",
                        "Prone with a bolster under the ankles",
                        "2 minutes",
                        &[],
                    ),
                    step(
                        "mas-lb-2",
                        2,
                        StepType::Treatment,
                        "Glide",
                        "Long strokes along the paraspinal muscles",
                        "10 minutes",
                        &["mas-effleurage"],
                    ),
                    step(
                        "mas-lb-3",
                        3,
                        StepType::Treatment,
                        "Deep work",
                        "Slow pressure into the gluteal attachments",
                        "15 minutes",
                        &["mas-petrissage"],
                    ),
                ],
                duration: "45 minutes".to_string(),
                frequency: "1-2 times weekly".to_string(),
                difficulty: "moderate".to_string(),
                contraindications: strings(&["acute disc herniation"]),
                precautions: Vec::new(),
                expected_outcomes: strings(&["Improved mobility"]),
                clinical_notes: "Refer out if pain radiates below the knee".to_string(),
            },
        ],
        techniques: vec![
            Technique {
                id: "mas-effleurage".to_string(),
                modality_id: ID.to_string(),
                name: "Effleurage".to_string(),
                description: "Long gliding strokes with the palms".to_string(),
                instructions: strings(&["Apply oil", "Glide toward the heart"]),
                duration: "5-10 minutes".to_string(),
                intensity: Intensity::Light,
                equipment: strings(&["massage oil"]),
                contraindications: Vec::new(),
            },
            Technique {
                id: "mas-petrissage".to_string(),
                modality_id: ID.to_string(),
                name: "Petrissage".to_string(),
                description: "Kneading and lifting of the muscle belly".to_string(),
                instructions: strings(&["Grasp the muscle", "Lift and squeeze rhythmically"]),
                duration: "5-15 minutes".to_string(),
                intensity: Intensity::Firm,
                equipment: Vec::new(),
                contraindications: strings(&["bruising"]),
            },
        ],
        effectiveness: vec![
            EffectivenessEntry {
                indication: "tension_headache".to_string(),
                effectiveness_score: 72,
                evidence_level: EvidenceLevel::Moderate,
                references: Vec::new(),
                clinical_notes: None,
            },
            EffectivenessEntry {
                indication: "lower_back_pain".to_string(),
                effectiveness_score: 80,
                evidence_level: EvidenceLevel::Moderate,
                references: Vec::new(),
                clinical_notes: None,
            },
        ],
        contraindications: Contraindications {
            absolute: strings(&["deep vein thrombosis", "fever"]),
            relative: strings(&["osteoporosis", "anticoagulant"]),
            pregnancy: PregnancyPolicy::Caution,
            age_restrictions: None,
            medications: strings(&["warfarin"]),
            conditions: strings(&["skin infection"]),
        },
        ui: UiBindings::with_prefix("Massage"),
    }
}
