// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use meridian_core::{
    AgeRestrictions, Contraindications, EffectivenessEntry, EvidenceLevel, Intensity,
    ModalityDefinition, ModalityMetadata, PregnancyPolicy, Protocol, SkillLevel, StaticModality,
    StepType, Technique, UiBindings,
};

use super::{step, strings};

const ID: &str = "acupressure";

/// Finger pressure on named points. Uses the default comparison metrics.
pub fn acupressure() -> StaticModality {
    StaticModality::new(definition()).with_synonyms([
        "acupoint",
        "pressure points",
        "shiatsu",
        "TCM",
    ])
}

fn definition() -> ModalityDefinition {
    ModalityDefinition {
        metadata: ModalityMetadata {
            id: ID.to_string(),
            name: "Acupressure".to_string(),
            display_name: "Acupressure".to_string(),
            icon: "hand-point".to_string(),
            version: "1.0.0".to_string(),
            skill_level: SkillLevel::Beginner,
            equipment_required: false,
            self_administered: true,
        },
        protocols: vec![
            Protocol {
                id: "acu-tension-headache".to_string(),
                modality_id: ID.to_string(),
                indication: "tension_headache".to_string(),
                name: "Tension Headache Relief".to_string(),
                description: "Point sequence for band-like headaches across the forehead and temples"
                    .to_string(),
                steps: vec![
                    step(
                        "acu-th-1",
                        1,
                        StepType::Preparation,
                        "Settle",
                        "Sit upright, relax the shoulders and breathe slowly",
                        "1 minute",
                        &[],
                    ),
                    {
                        let mut s = step(
                            "acu-th-2",
                            2,
                            StepType::Treatment,
                            "Hegu (LI4)",
                            "Press the web between thumb and index finger",
                            "2 minutes per hand",
                            &["acu-steady-pressure"],
                        );
                        s.points = strings(&["LI4"]);
                        s
                    },
                    {
                        let mut s = step(
                            "acu-th-3",
                            3,
                            StepType::Treatment,
                            "Feng Chi (GB20)",
                            "Circle the hollows at the base of the skull",
                            "2 minutes",
                            &["acu-circular-pressure"],
                        );
                        s.points = strings(&["GB20"]);
                        s
                    },
                    step(
                        "acu-th-4",
                        4,
                        StepType::Assessment,
                        "Reassess",
                        "Rate headache intensity from 0 to 10 and compare with the start",
                        "1 minute",
                        &[],
                    ),
                ],
                duration: "10 minutes".to_string(),
                frequency: "Up to 3 times daily".to_string(),
                difficulty: "easy".to_string(),
                contraindications: strings(&["open wounds at the point site"]),
                precautions: strings(&["Avoid LI4 during pregnancy"]),
                expected_outcomes: strings(&["Reduced headache intensity within 30 minutes"]),
                clinical_notes: "Combine with posture correction for recurrent headaches".to_string(),
            },
            Protocol {
                id: "acu-nausea".to_string(),
                modality_id: ID.to_string(),
                indication: "nausea".to_string(),
                name: "Nausea Relief".to_string(),
                description: "Pericardium 6 stimulation for motion sickness and nausea".to_string(),
                steps: vec![{
                    let mut s = step(
                        "acu-n-1",
                        1,
                        StepType::Treatment,
                        "Nei Guan (PC6)",
                        "Press three finger-widths above the inner wrist crease",
                        "3 minutes per wrist",
                        &["acu-steady-pressure"],
                    );
                    s.points = strings(&["PC6"]);
                    s
                }],
                duration: "6 minutes".to_string(),
                frequency: "As needed".to_string(),
                difficulty: "easy".to_string(),
                contraindications: Vec::new(),
                precautions: Vec::new(),
                expected_outcomes: strings(&["Eased nausea"]),
                clinical_notes: String::new(),
            },
        ],
        techniques: vec![
            Technique {
                id: "acu-steady-pressure".to_string(),
                modality_id: ID.to_string(),
                name: "Steady Pressure".to_string(),
                description: "Constant thumb pressure held on a single point".to_string(),
                instructions: strings(&[
                    "Locate the point",
                    "Press firmly without pain",
                    "Hold and breathe",
                ]),
                duration: "1-3 minutes".to_string(),
                intensity: Intensity::Moderate,
                equipment: Vec::new(),
                contraindications: Vec::new(),
            },
            Technique {
                id: "acu-circular-pressure".to_string(),
                modality_id: ID.to_string(),
                name: "Circular Pressure".to_string(),
                description: "Small circles with the fingertip over the point".to_string(),
                instructions: strings(&["Use the middle finger", "Circle slowly clockwise"]),
                duration: "1-2 minutes".to_string(),
                intensity: Intensity::Light,
                equipment: Vec::new(),
                contraindications: Vec::new(),
            },
        ],
        effectiveness: vec![
            EffectivenessEntry {
                indication: "tension_headache".to_string(),
                effectiveness_score: 75,
                evidence_level: EvidenceLevel::Moderate,
                references: Vec::new(),
                clinical_notes: None,
            },
            EffectivenessEntry {
                indication: "nausea".to_string(),
                effectiveness_score: 82,
                evidence_level: EvidenceLevel::High,
                references: Vec::new(),
                clinical_notes: Some("Strongest evidence for postoperative nausea".to_string()),
            },
        ],
        contraindications: Contraindications {
            absolute: strings(&["open wound", "fracture"]),
            relative: strings(&["anticoagulant", "varicose veins"]),
            pregnancy: PregnancyPolicy::Caution,
            age_restrictions: Some(AgeRestrictions {
                min_age: Some(5),
                max_age: None,
                special_considerations: Some("Use light pressure for children".to_string()),
            }),
            medications: strings(&["warfarin"]),
            conditions: strings(&["bleeding disorder"]),
        },
        ui: UiBindings::with_prefix("Acupressure"),
    }
}
