// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default behavior shared by every modality plugin.
//!
//! These are the bodies of the [`ModalityPlugin`](crate::ModalityPlugin)
//! default methods. They operate on a [`ModalityDefinition`] only, so a
//! concrete plugin can be declared as data and override just what differs.

use std::collections::HashSet;

use crate::error::MeridianError;
use crate::modality::ModalityDefinition;
use crate::types::{
    ComparisonMetrics, EffectivenessEntry, NavigationItem, PatientData, PregnancyPolicy, Protocol,
    RouteDefinition, SafetyAssessment, Technique,
};

/// Duration shown when a modality has no protocols.
pub const DEFAULT_DURATION: &str = "Variable";
/// Frequency shown when a modality has no protocols.
pub const DEFAULT_FREQUENCY: &str = "As needed";
/// Lower bound of the synthesized safety profile.
pub const MIN_SAFETY_PROFILE: u8 = 60;

/// Returns true if `key` and `query` name the same indication.
///
/// Exact equality, or either string contains the other ignoring case. So
/// `headache` finds `tension_headache`, `pain` matches `back_pain` in both
/// directions, and an empty query matches every key.
pub fn indication_matches(key: &str, query: &str) -> bool {
    if key == query {
        return true;
    }
    let key = key.to_lowercase();
    let query = query.to_lowercase();
    key.contains(&query) || query.contains(&key)
}

pub fn protocols_for_indication<'a>(
    definition: &'a ModalityDefinition,
    indication: &str,
) -> Vec<&'a Protocol> {
    definition
        .protocols
        .iter()
        .filter(|p| indication_matches(&p.indication, indication))
        .collect()
}

/// Techniques referenced by any step of a matching protocol, in the order the
/// modality declares them.
pub fn techniques_for_indication<'a>(
    definition: &'a ModalityDefinition,
    indication: &str,
) -> Vec<&'a Technique> {
    let referenced: HashSet<&str> = protocols_for_indication(definition, indication)
        .into_iter()
        .flat_map(|p| p.steps.iter())
        .flat_map(|s| s.techniques.iter().map(String::as_str))
        .collect();

    definition
        .techniques
        .iter()
        .filter(|t| referenced.contains(t.id.as_str()))
        .collect()
}

pub fn effectiveness_for_indication<'a>(
    definition: &'a ModalityDefinition,
    indication: &str,
) -> Option<&'a EffectivenessEntry> {
    definition
        .effectiveness
        .iter()
        .find(|e| indication_matches(&e.indication, indication))
}

/// True when the patient fact contains the rule term, ignoring case.
/// A blank rule never matches.
fn term_matches(patient_item: &str, rule: &str) -> bool {
    let rule = rule.trim().to_lowercase();
    !rule.is_empty() && patient_item.to_lowercase().contains(&rule)
}

fn patient_matches(patient: &PatientData, rule: &str) -> bool {
    patient
        .conditions
        .iter()
        .chain(patient.medications.iter())
        .any(|item| term_matches(item, rule))
}

/// Merges every rule source of a modality into a single verdict.
///
/// Absolute contraindications and the `avoid` pregnancy policy and a minimum
/// age violation make the verdict unsafe; relative contraindications, the
/// `caution` policy, and exceeding the maximum age only add warnings.
pub fn validate_safety(definition: &ModalityDefinition, patient: &PatientData) -> SafetyAssessment {
    let rules = &definition.contraindications;
    let name = &definition.metadata.name;
    let mut safe = true;
    let mut warnings = Vec::new();

    for contraindication in &rules.absolute {
        if patient_matches(patient, contraindication) {
            warnings.push(format!("Absolute contraindication: {contraindication}"));
            safe = false;
        }
    }

    for contraindication in &rules.relative {
        if patient_matches(patient, contraindication) {
            warnings.push(format!(
                "Relative contraindication: {contraindication} (use with caution)"
            ));
        }
    }

    if patient.pregnancy {
        match rules.pregnancy {
            PregnancyPolicy::Avoid => {
                warnings.push(format!("{name} should be avoided during pregnancy"));
                safe = false;
            }
            PregnancyPolicy::Caution => {
                warnings.push(format!(
                    "{name} requires caution during pregnancy; consult a qualified practitioner"
                ));
            }
            PregnancyPolicy::Safe => {}
        }
    }

    if let (Some(limits), Some(age)) = (&rules.age_restrictions, patient.age) {
        match limits.min_age {
            Some(min_age) if age < min_age => {
                warnings.push(format!("Minimum age for {name} is {min_age}"));
                safe = false;
            }
            _ => {}
        }
        match limits.max_age {
            Some(max_age) if age > max_age => warnings.push(format!(
                "Patient is above the recommended maximum age of {max_age} for {name}"
            )),
            _ => {}
        }
    }

    SafetyAssessment { safe, warnings }
}

/// Synthesizes comparison metrics from the modality's data.
pub fn comparison_metrics(definition: &ModalityDefinition) -> ComparisonMetrics {
    let first = definition.protocols.first();
    let metadata = &definition.metadata;
    let rules = &definition.contraindications;

    let effectiveness = if definition.effectiveness.is_empty() {
        0.0
    } else {
        let total: f64 = definition
            .effectiveness
            .iter()
            .map(|e| f64::from(e.effectiveness_score))
            .sum();
        total / definition.effectiveness.len() as f64
    };

    let penalty = 10 * rules.absolute.len() + 5 * rules.relative.len();
    let safety_profile = 100usize
        .saturating_sub(penalty)
        .max(usize::from(MIN_SAFETY_PROFILE)) as u8;

    let (cost, equipment) = if metadata.equipment_required {
        ("Low-Medium", "Required")
    } else {
        ("Free", "None")
    };

    ComparisonMetrics {
        duration: first
            .map(|p| p.duration.clone())
            .unwrap_or_else(|| DEFAULT_DURATION.to_string()),
        frequency: first
            .map(|p| p.frequency.clone())
            .unwrap_or_else(|| DEFAULT_FREQUENCY.to_string()),
        effectiveness,
        ease_of_use: metadata.skill_level.ease_of_use(),
        safety_profile,
        cost: cost.to_string(),
        equipment: equipment.to_string(),
    }
}

/// A single base route bound to the protocol page.
pub fn routes(definition: &ModalityDefinition) -> Vec<RouteDefinition> {
    vec![RouteDefinition {
        path: format!("/{}", definition.metadata.id),
        binding: definition.ui.protocol_page.clone(),
    }]
}

pub fn navigation(definition: &ModalityDefinition) -> NavigationItem {
    let metadata = &definition.metadata;
    NavigationItem {
        name: metadata.display_name.clone(),
        path: format!("/{}", metadata.id),
        icon: metadata.icon.clone(),
        category: None,
    }
}

/// Name, display name, and every protocol and technique name, de-duplicated
/// in first-seen order.
pub fn search_terms(definition: &ModalityDefinition) -> Vec<String> {
    let metadata = &definition.metadata;
    let candidates = [metadata.name.as_str(), metadata.display_name.as_str()]
        .into_iter()
        .chain(definition.protocols.iter().map(|p| p.name.as_str()))
        .chain(definition.techniques.iter().map(|t| t.name.as_str()));

    let mut seen = HashSet::new();
    let mut terms = Vec::new();
    for term in candidates {
        if seen.insert(term) {
            terms.push(term.to_string());
        }
    }
    terms
}

/// Validates the shape of a modality definition.
///
/// Collects every problem rather than failing fast, and reports them together
/// as one [`MeridianError::Validation`].
pub fn validate_definition(definition: &ModalityDefinition) -> Result<(), MeridianError> {
    let metadata = &definition.metadata;
    let id = metadata.id.as_str();
    let mut problems = Vec::new();

    if id.trim().is_empty() {
        problems.push("metadata.id must not be empty".to_string());
    }
    if let Err(e) = semver::Version::parse(&metadata.version) {
        problems.push(format!(
            "metadata.version `{}` is not a semantic version: {e}",
            metadata.version
        ));
    }

    let mut protocol_ids = HashSet::new();
    for (i, protocol) in definition.protocols.iter().enumerate() {
        if protocol.id.trim().is_empty() {
            problems.push(format!("protocols[{i}].id must not be empty"));
        } else if !protocol_ids.insert(protocol.id.as_str()) {
            problems.push(format!("duplicate protocol id `{}`", protocol.id));
        }
        if protocol.name.trim().is_empty() {
            problems.push(format!("protocols[{i}].name must not be empty"));
        }
        if protocol.indication.trim().is_empty() {
            problems.push(format!("protocols[{i}].indication must not be empty"));
        }
        if protocol.modality_id != id {
            problems.push(format!(
                "protocols[{i}].modalityId `{}` does not match plugin id",
                protocol.modality_id
            ));
        }

        let mut previous = None;
        for step in &protocol.steps {
            match previous {
                None if step.order != 1 => problems.push(format!(
                    "protocols[{i}] first step `{}` has order {}; orders must be 1-based and increasing",
                    step.id, step.order
                )),
                Some(prev) if step.order <= prev => problems.push(format!(
                    "protocols[{i}] step `{}` has order {} after {prev}; orders must be 1-based and increasing",
                    step.id, step.order
                )),
                _ => {}
            }
            previous = Some(step.order);
        }
    }

    for (i, technique) in definition.techniques.iter().enumerate() {
        if technique.modality_id != id {
            problems.push(format!(
                "techniques[{i}].modalityId `{}` does not match plugin id",
                technique.modality_id
            ));
        }
    }

    for entry in &definition.effectiveness {
        if entry.effectiveness_score > 100 {
            problems.push(format!(
                "effectiveness score {} for `{}` exceeds 100",
                entry.effectiveness_score, entry.indication
            ));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(MeridianError::validation(id, problems.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        AgeRestrictions, Contraindications, EvidenceLevel, Intensity, ModalityMetadata,
        SkillLevel, Step, StepType, UiBindings,
    };
    use proptest::prelude::*;

    fn step(id: &str, order: u32, techniques: &[&str]) -> Step {
        Step {
            id: id.to_string(),
            order,
            step_type: StepType::Treatment,
            title: format!("Step {order}"),
            description: String::new(),
            duration: "1 minute".to_string(),
            points: vec![],
            techniques: techniques.iter().map(|t| t.to_string()).collect(),
            equipment: vec![],
            notes: None,
        }
    }

    fn protocol(id: &str, indication: &str, steps: Vec<Step>) -> Protocol {
        Protocol {
            id: id.to_string(),
            modality_id: "test".to_string(),
            indication: indication.to_string(),
            name: format!("Protocol {id}"),
            description: String::new(),
            steps,
            duration: "10 minutes".to_string(),
            frequency: "Daily".to_string(),
            difficulty: "easy".to_string(),
            contraindications: vec![],
            precautions: vec![],
            expected_outcomes: vec![],
            clinical_notes: String::new(),
        }
    }

    fn technique(id: &str) -> Technique {
        Technique {
            id: id.to_string(),
            modality_id: "test".to_string(),
            name: format!("Technique {id}"),
            description: String::new(),
            instructions: vec!["press".to_string()],
            duration: "30 seconds".to_string(),
            intensity: Intensity::Moderate,
            equipment: vec![],
            contraindications: vec![],
        }
    }

    fn effectiveness(indication: &str, score: u8) -> EffectivenessEntry {
        EffectivenessEntry {
            indication: indication.to_string(),
            effectiveness_score: score,
            evidence_level: EvidenceLevel::Moderate,
            references: vec![],
            clinical_notes: None,
        }
    }

    fn definition() -> ModalityDefinition {
        ModalityDefinition {
            metadata: ModalityMetadata {
                id: "test".to_string(),
                name: "Test".to_string(),
                display_name: "Test Modality".to_string(),
                icon: "T".to_string(),
                version: "1.0.0".to_string(),
                skill_level: SkillLevel::Beginner,
                equipment_required: false,
                self_administered: true,
            },
            protocols: vec![
                protocol("p1", "tension_headache", vec![step("s1", 1, &["t1"])]),
                protocol("p2", "back_pain", vec![step("s1", 1, &["t2"]), step("s2", 2, &[])]),
            ],
            techniques: vec![technique("t1"), technique("t2"), technique("t3")],
            effectiveness: vec![effectiveness("headache", 80), effectiveness("back_pain", 90)],
            contraindications: Contraindications::default(),
            ui: UiBindings::with_prefix("Test"),
        }
    }

    #[test]
    fn indication_match_is_bidirectional_and_case_insensitive() {
        assert!(indication_matches("tension_headache", "headache"));
        assert!(indication_matches("headache", "TENSION_HEADACHE"));
        assert!(indication_matches("back_pain", "pain"));
        assert!(!indication_matches("back_pain", "nausea"));
    }

    #[test]
    fn protocols_filtered_by_indication() {
        let def = definition();
        let found = protocols_for_indication(&def, "headache");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "p1");
        assert!(protocols_for_indication(&def, "unrelated_xyz").is_empty());
    }

    #[test]
    fn techniques_come_from_matching_protocol_steps() {
        let def = definition();
        let ids: Vec<&str> = techniques_for_indication(&def, "back_pain")
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["t2"]);
    }

    #[test]
    fn effectiveness_returns_first_match() {
        let def = definition();
        let entry = effectiveness_for_indication(&def, "tension_headache").unwrap();
        assert_eq!(entry.effectiveness_score, 80);
        assert!(effectiveness_for_indication(&def, "nausea").is_none());
    }

    #[test]
    fn absolute_contraindication_marks_unsafe() {
        let mut def = definition();
        def.contraindications.absolute = vec!["diabetes".to_string()];
        let patient = PatientData {
            conditions: vec!["Diabetes Type 2".to_string()],
            ..Default::default()
        };
        let result = validate_safety(&def, &patient);
        assert!(!result.safe);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn relative_contraindication_only_warns() {
        let mut def = definition();
        def.contraindications.relative = vec!["blood thinners".to_string()];
        let patient = PatientData {
            medications: vec!["Blood Thinners (warfarin)".to_string()],
            ..Default::default()
        };
        let result = validate_safety(&def, &patient);
        assert!(result.safe);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn pregnancy_policy_avoid_and_caution() {
        let mut def = definition();
        let patient = PatientData {
            pregnancy: true,
            ..Default::default()
        };

        def.contraindications.pregnancy = PregnancyPolicy::Avoid;
        assert!(!validate_safety(&def, &patient).safe);

        def.contraindications.pregnancy = PregnancyPolicy::Caution;
        let result = validate_safety(&def, &patient);
        assert!(result.safe);
        assert!(!result.warnings.is_empty());

        def.contraindications.pregnancy = PregnancyPolicy::Safe;
        assert!(validate_safety(&def, &patient).warnings.is_empty());
    }

    #[test]
    fn age_restrictions_apply_asymmetrically() {
        let mut def = definition();
        def.contraindications.age_restrictions = Some(AgeRestrictions {
            min_age: Some(12),
            max_age: Some(80),
            special_considerations: None,
        });

        let child = PatientData {
            age: Some(8),
            ..Default::default()
        };
        assert!(!validate_safety(&def, &child).safe);

        let elder = PatientData {
            age: Some(85),
            ..Default::default()
        };
        let result = validate_safety(&def, &elder);
        assert!(result.safe);
        assert_eq!(result.warnings.len(), 1);

        let unknown = PatientData::default();
        assert!(validate_safety(&def, &unknown).warnings.is_empty());
    }

    #[test]
    fn patient_term_must_contain_the_contraindication() {
        let mut def = definition();
        def.contraindications.absolute = vec!["congestive heart failure".to_string()];

        let partial = PatientData {
            conditions: vec!["heart".to_string()],
            medications: vec!["a".to_string()],
            ..Default::default()
        };
        let result = validate_safety(&def, &partial);
        assert!(result.safe);
        assert!(result.warnings.is_empty());

        let full = PatientData {
            conditions: vec!["Chronic Congestive Heart Failure".to_string()],
            ..Default::default()
        };
        assert!(!validate_safety(&def, &full).safe);
    }

    #[test]
    fn safety_collects_every_warning() {
        let mut def = definition();
        def.contraindications.absolute = vec!["fracture".to_string()];
        def.contraindications.relative = vec!["hypertension".to_string()];
        def.contraindications.pregnancy = PregnancyPolicy::Avoid;
        let patient = PatientData {
            conditions: vec!["Fracture".to_string(), "Hypertension".to_string()],
            pregnancy: true,
            ..Default::default()
        };
        let result = validate_safety(&def, &patient);
        assert!(!result.safe);
        assert_eq!(result.warnings.len(), 3);
    }

    #[test]
    fn comparison_averages_effectiveness() {
        let metrics = comparison_metrics(&definition());
        assert_eq!(metrics.effectiveness, 85.0);
        assert_eq!(metrics.duration, "10 minutes");
        assert_eq!(metrics.frequency, "Daily");
        assert_eq!(metrics.ease_of_use, 90);
        assert_eq!(metrics.safety_profile, 100);
        assert_eq!(metrics.cost, "Free");
        assert_eq!(metrics.equipment, "None");
    }

    #[test]
    fn comparison_falls_back_when_empty() {
        let mut def = definition();
        def.protocols.clear();
        def.effectiveness.clear();
        def.metadata.equipment_required = true;
        def.metadata.skill_level = SkillLevel::Advanced;
        let metrics = comparison_metrics(&def);
        assert_eq!(metrics.duration, DEFAULT_DURATION);
        assert_eq!(metrics.frequency, DEFAULT_FREQUENCY);
        assert_eq!(metrics.effectiveness, 0.0);
        assert_eq!(metrics.ease_of_use, 50);
        assert_eq!(metrics.cost, "Low-Medium");
        assert_eq!(metrics.equipment, "Required");
    }

    #[test]
    fn safety_profile_is_floored() {
        let mut def = definition();
        def.contraindications.absolute = (0..5).map(|i| format!("a{i}")).collect();
        def.contraindications.relative = (0..3).map(|i| format!("r{i}")).collect();
        assert_eq!(comparison_metrics(&def).safety_profile, MIN_SAFETY_PROFILE);

        def.contraindications.absolute.truncate(2);
        def.contraindications.relative.truncate(1);
        assert_eq!(comparison_metrics(&def).safety_profile, 75);
    }

    #[test]
    fn search_terms_are_deduplicated() {
        let mut def = definition();
        def.metadata.display_name = "Test".to_string();
        def.techniques[2].name = "Technique t1".to_string();
        let terms = search_terms(&def);
        assert_eq!(
            terms,
            vec!["Test", "Protocol p1", "Protocol p2", "Technique t1", "Technique t2"]
        );
    }

    #[test]
    fn default_route_and_navigation() {
        let def = definition();
        let routes = routes(&def);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].path, "/test");
        assert_eq!(routes[0].binding.as_str(), "TestProtocolPage");

        let nav = navigation(&def);
        assert_eq!(nav.name, "Test Modality");
        assert_eq!(nav.path, "/test");
        assert!(nav.category.is_none());
    }

    #[test]
    fn valid_definition_passes() {
        assert!(validate_definition(&definition()).is_ok());
    }

    #[test]
    fn missing_indication_fails_validation() {
        let mut def = definition();
        def.protocols[0].indication = "  ".to_string();
        let err = validate_definition(&def).unwrap_err();
        match err {
            MeridianError::Validation { plugin_id, message } => {
                assert_eq!(plugin_id, "test");
                assert!(message.contains("indication"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn foreign_modality_id_fails_validation() {
        let mut def = definition();
        def.protocols[1].modality_id = "other".to_string();
        let err = validate_definition(&def).unwrap_err();
        assert!(err.to_string().contains("modalityId"));
    }

    #[test]
    fn validation_reports_all_problems() {
        let mut def = definition();
        def.metadata.version = "one".to_string();
        def.protocols[0].id = String::new();
        def.protocols[1].steps[1].order = 1;
        let message = validate_definition(&def).unwrap_err().to_string();
        assert!(message.contains("semantic version"));
        assert!(message.contains("protocols[0].id"));
        assert!(message.contains("orders must be 1-based"));
    }

    #[test]
    fn first_step_must_be_order_one() {
        let mut def = definition();
        def.protocols[0].steps = vec![step("s1", 7, &["t1"])];
        let message = validate_definition(&def).unwrap_err().to_string();
        assert!(message.contains("first step `s1` has order 7"));
        assert!(message.contains("orders must be 1-based"));
    }

    proptest! {
        #[test]
        fn indication_match_is_symmetric(a in "[a-zA-Z_]{0,12}", b in "[a-zA-Z_]{0,12}") {
            prop_assert_eq!(indication_matches(&a, &b), indication_matches(&b, &a));
        }

        #[test]
        fn safety_profile_stays_in_bounds(absolute in 0usize..20, relative in 0usize..20) {
            let mut def = definition();
            def.contraindications.absolute = (0..absolute).map(|i| format!("a{i}")).collect();
            def.contraindications.relative = (0..relative).map(|i| format!("r{i}")).collect();
            let profile = comparison_metrics(&def).safety_profile;
            prop_assert!((MIN_SAFETY_PROFILE..=100).contains(&profile));
        }
    }
}
