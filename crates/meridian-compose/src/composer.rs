// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamic composer: projects the registry into presentation-ready structures.
//!
//! Nothing here is cached. Every call reads the registry's current snapshot,
//! so a re-registered plugin shows up on the next call.

use std::sync::Arc;

use meridian_core::{
    ComparisonMetrics, Contraindications, ModalityMetadata, NavigationItem, PatientData,
    SafetyAssessment, Technique, UiBinding,
};
use meridian_plugin::{ComparisonRow, PluginRegistry};
use serde::Serialize;

/// Navigation category assigned to every modality entry.
pub const NAV_CATEGORY: &str = "modality";

/// Data handed to the component a route is bound to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum RouteProps {
    ProtocolPage,
    Techniques(Vec<Technique>),
    Safety(Contraindications),
}

/// A route contributed to the host application's router.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEntry {
    pub plugin_id: String,
    pub path: String,
    pub binding: UiBinding,
    pub props: RouteProps,
}

/// Summary card for a modality treating a given indication.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalityCard {
    pub metadata: ModalityMetadata,
    pub protocol_count: usize,
    /// Score for the requested indication, 0 when the modality has none.
    pub effectiveness_score: u8,
    pub link: String,
    pub binding: UiBinding,
}

/// Full comparison metrics for one modality.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonTableRow {
    pub id: String,
    pub name: String,
    pub icon: String,
    #[serde(flatten)]
    pub metrics: ComparisonMetrics,
    pub binding: UiBinding,
}

/// Safety verdict of one modality for a patient.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyReportEntry {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub assessment: SafetyAssessment,
}

/// Builds routes, navigation, cards, and comparisons from the registry.
#[derive(Debug, Clone)]
pub struct DynamicComposer {
    registry: Arc<PluginRegistry>,
}

impl DynamicComposer {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    /// Four routes per plugin, in registration order: the base page, the
    /// per-indication page, the techniques list, and the safety page.
    pub fn plugin_routes(&self) -> Vec<RouteEntry> {
        self.registry
            .all()
            .iter()
            .flat_map(|plugin| {
                let id = plugin.id();
                let ui = plugin.ui_bindings();
                [
                    RouteEntry {
                        plugin_id: id.to_string(),
                        path: format!("/{id}"),
                        binding: ui.protocol_page.clone(),
                        props: RouteProps::ProtocolPage,
                    },
                    RouteEntry {
                        plugin_id: id.to_string(),
                        path: format!("/{id}/:indication"),
                        binding: ui.protocol_page.clone(),
                        props: RouteProps::ProtocolPage,
                    },
                    RouteEntry {
                        plugin_id: id.to_string(),
                        path: format!("/{id}/techniques"),
                        binding: ui.techniques_list.clone(),
                        props: RouteProps::Techniques(plugin.techniques().to_vec()),
                    },
                    RouteEntry {
                        plugin_id: id.to_string(),
                        path: format!("/{id}/safety"),
                        binding: ui.safety_warnings.clone(),
                        props: RouteProps::Safety(plugin.contraindications().clone()),
                    },
                ]
            })
            .collect()
    }

    pub fn plugin_navigation(&self) -> Vec<NavigationItem> {
        self.registry
            .all()
            .iter()
            .map(|plugin| NavigationItem {
                category: Some(NAV_CATEGORY.to_string()),
                ..plugin.navigation()
            })
            .collect()
    }

    /// One card per modality with a protocol for `indication`.
    pub fn modality_cards(&self, indication: &str) -> Vec<ModalityCard> {
        self.registry
            .for_indication(indication)
            .iter()
            .map(|plugin| ModalityCard {
                metadata: plugin.metadata().clone(),
                protocol_count: plugin.protocols_for_indication(indication).len(),
                effectiveness_score: plugin
                    .effectiveness_for_indication(indication)
                    .map_or(0, |entry| entry.effectiveness_score),
                link: format!("/{}/{indication}", plugin.id()),
                binding: plugin.ui_bindings().protocol_card.clone(),
            })
            .collect()
    }

    pub fn comparison_data(&self, indication: &str) -> Vec<ComparisonRow> {
        self.registry.comparison_data(indication)
    }

    /// Full comparison metrics for every modality treating `indication`.
    pub fn comparison_table(&self, indication: &str) -> Vec<ComparisonTableRow> {
        self.registry
            .for_indication(indication)
            .iter()
            .map(|plugin| {
                let metadata = plugin.metadata();
                ComparisonTableRow {
                    id: metadata.id.clone(),
                    name: metadata.name.clone(),
                    icon: metadata.icon.clone(),
                    metrics: plugin.comparison_data(),
                    binding: plugin.ui_bindings().comparison_metrics.clone(),
                }
            })
            .collect()
    }

    /// Screen `patient` against every registered modality.
    pub fn safety_report(&self, patient: &PatientData) -> Vec<SafetyReportEntry> {
        self.registry
            .all()
            .iter()
            .map(|plugin| SafetyReportEntry {
                id: plugin.id().to_string(),
                name: plugin.metadata().name.clone(),
                assessment: plugin.validate_safety_for_patient(patient),
            })
            .collect()
    }

    /// True once at least one plugin is registered.
    pub fn is_ready(&self) -> bool {
        !self.registry.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_plugin::catalog::{acupressure, hydrotherapy, massage};

    fn composer() -> DynamicComposer {
        let registry = Arc::new(PluginRegistry::new());
        registry.register(Arc::new(acupressure()));
        registry.register(Arc::new(massage()));
        registry.register(Arc::new(hydrotherapy()));
        DynamicComposer::new(registry)
    }

    #[test]
    fn routes_are_four_per_plugin_in_order() {
        let composer = composer();
        let routes = composer.plugin_routes();
        assert_eq!(routes.len(), 12);

        let paths: Vec<&str> = routes[..4].iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/acupressure",
                "/acupressure/:indication",
                "/acupressure/techniques",
                "/acupressure/safety"
            ]
        );
        assert_eq!(routes[4].plugin_id, "massage");
        assert_eq!(routes[8].plugin_id, "hydrotherapy");
    }

    #[test]
    fn route_props_carry_plugin_data() {
        let composer = composer();
        let routes = composer.plugin_routes();
        match &routes[2].props {
            RouteProps::Techniques(techniques) => assert_eq!(techniques.len(), 2),
            other => panic!("expected techniques props, got {other:?}"),
        }
        match &routes[3].props {
            RouteProps::Safety(rules) => assert!(rules.absolute.contains(&"fracture".to_string())),
            other => panic!("expected safety props, got {other:?}"),
        }
        assert_eq!(routes[3].binding.as_str(), "AcupressureSafetyWarnings");
    }

    #[test]
    fn route_props_serialize_tagged() {
        let json = serde_json::to_value(&composer().plugin_routes()[0]).unwrap();
        assert_eq!(json["pluginId"], "acupressure");
        assert_eq!(json["props"]["kind"], "protocolPage");
        assert_eq!(json["binding"], "AcupressureProtocolPage");
    }

    #[test]
    fn navigation_is_categorized() {
        let nav = composer().plugin_navigation();
        assert_eq!(nav.len(), 3);
        assert!(nav.iter().all(|item| item.category.as_deref() == Some(NAV_CATEGORY)));
        assert_eq!(nav[1].name, "Therapeutic Massage");
        assert_eq!(nav[1].path, "/massage");
    }

    #[test]
    fn cards_link_to_indication_and_default_score_to_zero() {
        let composer = composer();
        let cards = composer.modality_cards("headache");
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].link, "/acupressure/headache");
        assert_eq!(cards[0].effectiveness_score, 75);
        assert_eq!(cards[0].binding.as_str(), "AcupressureProtocolCard");

        composer.registry().register(Arc::new(meridian_core::StaticModality::new({
            let mut definition = massage().into_definition();
            definition.effectiveness.clear();
            definition
        })));
        let cards = composer.modality_cards("headache");
        assert_eq!(cards[1].effectiveness_score, 0);
    }

    #[test]
    fn comparison_table_uses_override_and_binding() {
        let composer = composer();
        let rows = composer.comparison_table("tension_headache");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].metrics.cost, "Medium");
        assert_eq!(rows[1].binding.as_str(), "MassageComparisonMetrics");
        assert_eq!(rows[0].metrics.ease_of_use, 90);

        let summary = composer.comparison_data("tension_headache");
        assert_eq!(summary[0].protocols, 1);
    }

    #[test]
    fn safety_report_covers_every_plugin() {
        let composer = composer();
        let patient = PatientData {
            pregnancy: true,
            ..PatientData::default()
        };
        let report = composer.safety_report(&patient);
        assert_eq!(report.len(), 3);
        assert!(report[0].assessment.safe);
        assert!(!report[0].assessment.warnings.is_empty());
        assert!(!report[2].assessment.safe);
    }

    #[test]
    fn ready_once_something_is_registered() {
        let registry = Arc::new(PluginRegistry::new());
        let composer = DynamicComposer::new(Arc::clone(&registry));
        assert!(!composer.is_ready());
        registry.register(Arc::new(acupressure()));
        assert!(composer.is_ready());
        assert_eq!(composer.registry().get("acupressure").unwrap().id(), "acupressure");
    }
}
