// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Consumer bindings: how presentation code gets at registry data.
//!
//! A [`RegistryBinding`] waits for the loader's readiness signal, bounded by a
//! timeout, then takes and holds a snapshot of navigation, routes, and stats.
//! Later registry changes are observed through [`RegistryBinding::changed`],
//! which re-queries everything rather than patching the held snapshot.

use std::sync::Arc;
use std::time::Duration;

use meridian_config::model::BindingsConfig;
use meridian_core::{MeridianError, NavigationItem};
use meridian_plugin::{PluginRegistry, Readiness, RegistryStats};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::composer::{DynamicComposer, RouteEntry};

/// Registry data as seen by a consumer at one revision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingSnapshot {
    pub revision: u64,
    pub navigation: Vec<NavigationItem>,
    pub routes: Vec<RouteEntry>,
    pub stats: RegistryStats,
}

/// Readiness-gated view of the registry for one consumer.
pub struct RegistryBinding {
    composer: DynamicComposer,
    readiness: Readiness,
    timeout: Duration,
    changes: watch::Receiver<u64>,
    current: Option<BindingSnapshot>,
}

impl RegistryBinding {
    pub fn new(registry: Arc<PluginRegistry>, readiness: Readiness, timeout: Duration) -> Self {
        let changes = registry.subscribe();
        Self {
            composer: DynamicComposer::new(registry),
            readiness,
            timeout,
            changes,
            current: None,
        }
    }

    /// Binding using the readiness timeout from `[bindings]`.
    pub fn from_config(
        registry: Arc<PluginRegistry>,
        readiness: Readiness,
        config: &BindingsConfig,
    ) -> Self {
        Self::new(registry, readiness, config.readiness_timeout())
    }

    /// Snapshot the registry, waiting for the loader only while it is empty.
    ///
    /// Fails with [`MeridianError::Timeout`] if the loader does not finish in
    /// time, and with [`MeridianError::NoPluginsLoaded`] if it finished but
    /// registered nothing. Either way the binding keeps no snapshot.
    pub async fn wait_ready(&mut self) -> Result<&BindingSnapshot, MeridianError> {
        if self.composer.is_ready() {
            debug!("plugin registry already populated");
            return Ok(self.refresh());
        }
        match tokio::time::timeout(self.timeout, self.readiness.wait()).await {
            Ok(signal) => signal?,
            Err(_) => {
                warn!(
                    timeout = ?self.timeout,
                    "plugin registry not ready before timeout"
                );
                return Err(MeridianError::Timeout {
                    duration: self.timeout,
                });
            }
        }
        if !self.composer.is_ready() {
            warn!("loader finished without registering any plugins");
            return Err(MeridianError::NoPluginsLoaded);
        }
        Ok(self.refresh())
    }

    /// Wait for the next registry write, then re-query wholesale.
    pub async fn changed(&mut self) -> Result<&BindingSnapshot, MeridianError> {
        self.changes
            .changed()
            .await
            .map_err(|_| MeridianError::Internal("plugin registry dropped".into()))?;
        Ok(self.refresh())
    }

    /// The snapshot held since the last successful wait, if any.
    pub fn current(&self) -> Option<&BindingSnapshot> {
        self.current.as_ref()
    }

    pub fn composer(&self) -> &DynamicComposer {
        &self.composer
    }

    fn refresh(&mut self) -> &BindingSnapshot {
        let revision = *self.changes.borrow_and_update();
        debug!(revision, "binding snapshot refreshed");
        self.current.insert(BindingSnapshot {
            revision,
            navigation: self.composer.plugin_navigation(),
            routes: self.composer.plugin_routes(),
            stats: self.composer.registry().stats(),
        })
    }
}

impl std::fmt::Debug for RegistryBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryBinding")
            .field("timeout", &self.timeout)
            .field("ready", &self.readiness.is_signaled())
            .field("revision", &self.current.as_ref().map(|s| s.revision))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_plugin::PluginLoader;
    use meridian_plugin::catalog::{acupressure, builtin_catalog, massage};

    #[tokio::test]
    async fn snapshot_after_load() {
        let registry = Arc::new(PluginRegistry::new());
        let mut loader = PluginLoader::new(Arc::clone(&registry), builtin_catalog());
        let mut binding =
            RegistryBinding::new(Arc::clone(&registry), loader.readiness(), Duration::from_secs(5));
        assert!(binding.current().is_none());

        loader.load_all().await;
        let snapshot = binding.wait_ready().await.unwrap();
        assert_eq!(snapshot.stats.total_plugins, 3);
        assert_eq!(snapshot.routes.len(), 12);
        assert_eq!(snapshot.navigation.len(), 3);
        assert_eq!(snapshot.revision, 3);
        assert!(binding.current().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_when_loader_never_finishes() {
        let registry = Arc::new(PluginRegistry::new());
        let loader = PluginLoader::new(Arc::clone(&registry), builtin_catalog());
        let mut binding = RegistryBinding::new(
            Arc::clone(&registry),
            loader.readiness(),
            Duration::from_millis(5000),
        );

        let err = binding.wait_ready().await.unwrap_err();
        assert!(matches!(err, MeridianError::Timeout { duration } if duration.as_millis() == 5000));
        assert!(binding.current().is_none());
        drop(loader);
    }

    #[tokio::test(start_paused = true)]
    async fn populated_registry_needs_no_loader() {
        let registry = Arc::new(PluginRegistry::new());
        registry.register(Arc::new(acupressure()));
        let loader = PluginLoader::new(Arc::clone(&registry), builtin_catalog());
        let mut binding =
            RegistryBinding::new(Arc::clone(&registry), loader.readiness(), Duration::from_secs(5));

        let snapshot = binding.wait_ready().await.unwrap();
        assert_eq!(snapshot.stats.total_plugins, 1);
        assert_eq!(snapshot.revision, 1);
        assert!(!loader.is_initialized());
    }

    #[tokio::test]
    async fn empty_load_is_reported() {
        let registry = Arc::new(PluginRegistry::new());
        let mut loader = PluginLoader::new(Arc::clone(&registry), Vec::new());
        let config = BindingsConfig::default();
        let mut binding =
            RegistryBinding::from_config(Arc::clone(&registry), loader.readiness(), &config);

        loader.load_all().await;
        assert!(matches!(
            binding.wait_ready().await,
            Err(MeridianError::NoPluginsLoaded)
        ));
    }

    #[tokio::test]
    async fn changes_are_picked_up_by_requery() {
        let registry = Arc::new(PluginRegistry::new());
        let mut loader = PluginLoader::new(Arc::clone(&registry), vec![Arc::new(acupressure())]);
        let mut binding =
            RegistryBinding::new(Arc::clone(&registry), loader.readiness(), Duration::from_secs(1));
        loader.load_all().await;
        assert_eq!(binding.wait_ready().await.unwrap().stats.total_plugins, 1);

        registry.register(Arc::new(massage()));
        let snapshot = binding.changed().await.unwrap();
        assert_eq!(snapshot.stats.total_plugins, 2);
        assert_eq!(snapshot.navigation[1].path, "/massage");
    }
}
