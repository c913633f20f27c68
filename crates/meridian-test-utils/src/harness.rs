// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the full stack (registry, loader, composer) around
//! a configurable catalog. Tests load it and then assert against the composer
//! or a binding the same way the application does.

use std::sync::Arc;

use meridian_compose::{DynamicComposer, RegistryBinding};
use meridian_config::MeridianConfig;
use meridian_core::ModalityPlugin;
use meridian_plugin::{LoadReport, PluginLoader, PluginRegistry, builtin_catalog};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    catalog: Vec<Arc<dyn ModalityPlugin>>,
    config: MeridianConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            catalog: Vec::new(),
            config: MeridianConfig::default(),
        }
    }

    /// Append the built-in modalities to the catalog.
    pub fn with_builtin_catalog(mut self) -> Self {
        self.catalog.extend(builtin_catalog());
        self
    }

    pub fn with_plugin(mut self, plugin: Arc<dyn ModalityPlugin>) -> Self {
        self.catalog.push(plugin);
        self
    }

    pub fn with_config(mut self, config: MeridianConfig) -> Self {
        self.config = config;
        self
    }

    /// Disable a plugin through `[plugins.enabled]`.
    pub fn disable(mut self, id: &str) -> Self {
        self.config.plugins.enabled.insert(id.to_string(), false);
        self
    }

    /// Build the harness without loading anything.
    pub fn build(self) -> TestHarness {
        let registry = Arc::new(PluginRegistry::new());
        let loader = PluginLoader::with_config(
            Arc::clone(&registry),
            self.catalog,
            self.config.plugins.clone(),
        );
        let composer = DynamicComposer::new(Arc::clone(&registry));
        TestHarness {
            registry,
            loader,
            composer,
            config: self.config,
        }
    }

    /// Build the harness and run the loader once.
    pub async fn load(self) -> (TestHarness, LoadReport) {
        let mut harness = self.build();
        let report = harness.loader.load_all().await;
        (harness, report)
    }
}

/// A complete plugin stack with a fresh registry.
pub struct TestHarness {
    pub registry: Arc<PluginRegistry>,
    pub loader: PluginLoader,
    pub composer: DynamicComposer,
    pub config: MeridianConfig,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A binding gated on this harness's loader, using the configured timeout.
    pub fn binding(&self) -> RegistryBinding {
        RegistryBinding::from_config(
            Arc::clone(&self.registry),
            self.loader.readiness(),
            &self.config.bindings,
        )
    }
}
