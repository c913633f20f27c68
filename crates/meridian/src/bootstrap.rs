// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application startup: registry, loader, and readiness wait.

use std::sync::Arc;

use meridian_compose::{DynamicComposer, RegistryBinding};
use meridian_config::MeridianConfig;
use meridian_core::MeridianError;
use meridian_plugin::{LoadReport, PluginLoader, PluginRegistry, builtin_catalog};
use tracing::{info, warn};

/// Everything a command needs once plugins are loaded.
pub struct App {
    pub registry: Arc<PluginRegistry>,
    pub composer: DynamicComposer,
    pub report: LoadReport,
}

/// Build the registry, run the loader over the built-in catalog, and wait
/// for readiness through a binding bounded by the configured timeout.
pub async fn bootstrap(config: &MeridianConfig) -> Result<App, MeridianError> {
    let registry = Arc::new(PluginRegistry::new());
    let mut loader = PluginLoader::with_config(
        Arc::clone(&registry),
        builtin_catalog(),
        config.plugins.clone(),
    );
    let mut binding =
        RegistryBinding::from_config(Arc::clone(&registry), loader.readiness(), &config.bindings);

    let (report, ready) = tokio::join!(loader.load_all(), binding.wait_ready());
    ready?;
    let plugins = registry.len();

    for failure in &report.failed {
        warn!(plugin_id = %failure.plugin_id, "plugin unavailable: {}", failure.error);
    }
    info!(app = %config.app.name, plugins, "meridian ready");

    Ok(App {
        composer: DynamicComposer::new(Arc::clone(&registry)),
        registry,
        report,
    })
}
