// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the complete Meridian pipeline.
//!
//! Each test creates an isolated TestHarness with a fresh registry, a loader
//! over its own catalog, and a composer. Tests are independent and
//! order-insensitive.

use std::time::Duration;

use meridian_core::{MeridianError, PatientData, PregnancyPolicy};
use meridian_test_utils::{MockModality, ModalityBuilder, TestHarness};
use serial_test::serial;

// ---- Registration semantics ----

#[tokio::test]
async fn test_reregistration_is_idempotent_and_last_write_wins() {
    let (harness, _) = TestHarness::builder()
        .with_plugin(ModalityBuilder::new("a").protocol("headache").build_plugin())
        .load()
        .await;

    harness.registry.register(
        ModalityBuilder::new("a")
            .name("Alpha v2")
            .protocol("headache")
            .build_plugin(),
    );

    assert_eq!(harness.registry.all().len(), 1);
    assert_eq!(harness.registry.get("a").unwrap().metadata().name, "Alpha v2");
}

#[tokio::test]
async fn test_uniqueness_and_removal() {
    let (harness, _) = TestHarness::builder()
        .with_plugin(ModalityBuilder::new("a").protocol("x").build_plugin())
        .with_plugin(ModalityBuilder::new("b").protocol("x").build_plugin())
        .with_plugin(ModalityBuilder::new("c").protocol("x").build_plugin())
        .load()
        .await;

    assert_eq!(harness.registry.stats().total_plugins, 3);
    harness.registry.unregister("b");
    assert_eq!(harness.registry.stats().total_plugins, 2);
    assert!(harness.registry.get("b").is_none());
}

// ---- Indication queries ----

#[tokio::test]
async fn test_indication_filter() {
    let (harness, _) = TestHarness::builder()
        .with_plugin(
            ModalityBuilder::new("a")
                .protocol("headache")
                .protocol("back_pain")
                .build_plugin(),
        )
        .load()
        .await;

    assert_eq!(harness.registry.for_indication("headache").len(), 1);
    assert!(harness.registry.for_indication("unrelated_xyz").is_empty());
    assert!(harness.composer.modality_cards("unrelated_xyz").is_empty());
}

#[tokio::test]
async fn test_default_comparison_effectiveness_is_mean() {
    let (harness, _) = TestHarness::builder()
        .with_plugin(
            ModalityBuilder::new("a")
                .protocol("headache")
                .effectiveness("headache", 80)
                .effectiveness("migraine", 90)
                .build_plugin(),
        )
        .load()
        .await;

    let rows = harness.composer.comparison_data("headache");
    assert_eq!(rows[0].effectiveness, 85.0);
    let table = harness.composer.comparison_table("headache");
    assert_eq!(table[0].metrics.effectiveness, 85.0);
    assert_eq!(table[0].metrics.duration, "15 minutes");
}

// ---- Safety ----

#[tokio::test]
async fn test_safety_absolute_and_pregnancy() {
    let (harness, _) = TestHarness::builder()
        .with_plugin(
            ModalityBuilder::new("avoid")
                .absolute("diabetes")
                .pregnancy(PregnancyPolicy::Avoid)
                .protocol("x")
                .build_plugin(),
        )
        .with_plugin(
            ModalityBuilder::new("careful")
                .pregnancy(PregnancyPolicy::Caution)
                .protocol("x")
                .build_plugin(),
        )
        .load()
        .await;

    let diabetic = PatientData {
        conditions: vec!["Diabetes Type 2".to_string()],
        ..PatientData::default()
    };
    let report = harness.composer.safety_report(&diabetic);
    assert!(!report[0].assessment.safe);
    assert!(report[1].assessment.safe);

    let pregnant = PatientData {
        pregnancy: true,
        ..PatientData::default()
    };
    let report = harness.composer.safety_report(&pregnant);
    assert!(!report[0].assessment.safe);
    assert!(report[1].assessment.safe);
    assert_eq!(report[1].assessment.warnings.len(), 1);
}

// ---- Composition ----

#[tokio::test]
async fn test_route_count_is_four_per_plugin() {
    let (harness, _) = TestHarness::builder().with_builtin_catalog().load().await;
    let routes = harness.composer.plugin_routes();
    assert_eq!(routes.len(), 4 * harness.registry.len());
    assert_eq!(routes[0].path, "/acupressure");
    assert_eq!(routes[11].path, "/hydrotherapy/safety");
}

#[tokio::test]
async fn test_readiness_gate() {
    let harness = TestHarness::builder().build();
    assert!(!harness.composer.is_ready());
    harness
        .registry
        .register(ModalityBuilder::new("a").protocol("x").build_plugin());
    assert!(harness.composer.is_ready());
}

// ---- Loader ----

#[tokio::test]
async fn test_partial_failure_isolation() {
    let broken = MockModality::new(ModalityBuilder::new("broken").protocol("x").build())
        .failing("protocol data unavailable");
    let (harness, report) = TestHarness::builder()
        .with_plugin(ModalityBuilder::new("a").protocol("x").build_plugin())
        .with_plugin(std::sync::Arc::new(broken))
        .with_plugin(ModalityBuilder::new("c").protocol("x").build_plugin())
        .load()
        .await;

    assert_eq!(harness.registry.ids(), vec!["a", "c"]);
    assert_eq!(report.failed[0].plugin_id, "broken");
    assert_eq!(report.loaded, vec!["a", "c"]);
}

#[tokio::test]
async fn test_invalid_definition_is_rejected_at_load() {
    let mut definition = ModalityBuilder::new("bad").protocol("x").build();
    definition.protocols[0].modality_id = "other".to_string();
    let (harness, report) = TestHarness::builder()
        .with_plugin(std::sync::Arc::new(MockModality::new(definition)))
        .load()
        .await;

    assert!(harness.registry.is_empty());
    assert!(matches!(
        report.failed[0].error,
        MeridianError::Validation { .. }
    ));
}

// ---- Bindings ----

#[tokio::test]
async fn test_binding_waits_for_slow_loader() {
    let slow = MockModality::new(ModalityBuilder::new("slow").protocol("x").build())
        .with_delay(Duration::from_millis(50));
    let mut harness = TestHarness::builder()
        .with_plugin(std::sync::Arc::new(slow))
        .build();
    let mut binding = harness.binding();

    let (report, snapshot) = tokio::join!(harness.loader.load_all(), binding.wait_ready());
    assert_eq!(report.loaded, vec!["slow"]);
    assert_eq!(snapshot.unwrap().stats.total_plugins, 1);
}

#[tokio::test(start_paused = true)]
async fn test_binding_times_out_on_stuck_loader() {
    let stuck = MockModality::new(ModalityBuilder::new("stuck").protocol("x").build())
        .with_delay(Duration::from_secs(3600));
    let mut harness = TestHarness::builder()
        .with_plugin(std::sync::Arc::new(stuck))
        .build();
    let mut binding = harness.binding();

    let result = tokio::select! {
        _ = harness.loader.load_all() => None,
        ready = binding.wait_ready() => Some(ready.map(|s| s.revision)),
    };
    assert!(matches!(result, Some(Err(MeridianError::Timeout { .. }))));
}

// ---- Configuration ----

#[test]
#[serial]
fn test_env_override_disables_plugin() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("MERIDIAN_PLUGINS_ENABLED_MASSAGE", "false");
        let config = meridian_config::load_and_validate().expect("config should load");
        assert!(!config.plugins.is_enabled("massage"));
        assert!(config.plugins.is_enabled("acupressure"));
        Ok(())
    });
}
