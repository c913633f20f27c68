// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-time, failure-tolerant population of the registry.
//!
//! The [`PluginLoader`] walks a fixed catalog of known plugins, awaiting each
//! plugin's `initialize()` in turn and registering the ones that pass. A
//! failing plugin is logged and skipped; it never stops the others. When a
//! load finishes the loader resolves its [`Readiness`] signal so consumers can
//! stop waiting.

use std::sync::Arc;

use meridian_config::model::PluginsConfig;
use meridian_core::{MeridianError, ModalityPlugin};
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::registry::PluginRegistry;

/// A plugin that failed initialization.
#[derive(Debug)]
pub struct LoadFailure {
    pub plugin_id: String,
    pub error: MeridianError,
}

/// Outcome of a [`PluginLoader::load_all`] call.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Ids registered by this load, in catalog order.
    pub loaded: Vec<String>,
    /// Plugins rejected by their own initialization.
    pub failed: Vec<LoadFailure>,
    /// Plugins switched off in configuration.
    pub disabled: Vec<String>,
    /// True when the call was a no-op because plugins were already loaded.
    pub already_loaded: bool,
}

/// Resolves once the loader has finished a load pass.
///
/// Cheap to clone; every clone observes the same signal.
#[derive(Debug, Clone)]
pub struct Readiness {
    rx: watch::Receiver<bool>,
}

impl Readiness {
    /// True once a load pass has completed (and no reload is in progress).
    pub fn is_signaled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until the loader signals completion.
    pub async fn wait(&mut self) -> Result<(), MeridianError> {
        self.rx
            .wait_for(|done| *done)
            .await
            .map(|_| ())
            .map_err(|_| MeridianError::Internal("loader dropped before signaling readiness".into()))
    }
}

/// Populates a [`PluginRegistry`] from a known catalog.
pub struct PluginLoader {
    registry: Arc<PluginRegistry>,
    catalog: Vec<Arc<dyn ModalityPlugin>>,
    plugins_config: PluginsConfig,
    initialized: bool,
    registered: Vec<String>,
    ready: watch::Sender<bool>,
}

impl PluginLoader {
    /// Create a loader for `catalog` with every plugin enabled.
    pub fn new(registry: Arc<PluginRegistry>, catalog: Vec<Arc<dyn ModalityPlugin>>) -> Self {
        Self::with_config(registry, catalog, PluginsConfig::default())
    }

    /// Create a loader honoring per-plugin enablement from configuration.
    pub fn with_config(
        registry: Arc<PluginRegistry>,
        catalog: Vec<Arc<dyn ModalityPlugin>>,
        plugins_config: PluginsConfig,
    ) -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            registry,
            catalog,
            plugins_config,
            initialized: false,
            registered: Vec::new(),
            ready,
        }
    }

    /// Handle for awaiting load completion.
    pub fn readiness(&self) -> Readiness {
        Readiness {
            rx: self.ready.subscribe(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    /// Register every enabled catalog plugin that initializes cleanly.
    ///
    /// Plugins are initialized strictly one after another, so registration
    /// order follows catalog order. Calling this again after a successful
    /// load does nothing.
    pub async fn load_all(&mut self) -> LoadReport {
        if self.initialized {
            info!("plugins already loaded");
            return LoadReport {
                already_loaded: true,
                ..LoadReport::default()
            };
        }

        let mut report = LoadReport::default();
        for plugin in &self.catalog {
            let id = plugin.id().to_string();

            if !self.plugins_config.is_enabled(&id) {
                debug!(plugin_id = %id, "plugin disabled by configuration, skipping");
                report.disabled.push(id);
                continue;
            }

            match plugin.initialize().await {
                Ok(()) => {
                    self.registry.register(Arc::clone(plugin));
                    self.registered.push(id.clone());
                    report.loaded.push(id);
                }
                Err(err) => {
                    error!(plugin_id = %id, error = %err, "failed to load plugin");
                    report.failed.push(LoadFailure {
                        plugin_id: id,
                        error: err,
                    });
                }
            }
        }

        self.initialized = true;
        info!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            disabled = report.disabled.len(),
            "plugin load complete"
        );
        self.ready.send_replace(true);
        report
    }

    /// Drop everything this loader registered and run a full load again.
    pub async fn reload(&mut self) -> LoadReport {
        info!("reloading plugins");
        self.ready.send_replace(false);
        for id in self.registered.drain(..) {
            self.registry.unregister(&id);
        }
        self.initialized = false;
        self.load_all().await
    }
}

impl std::fmt::Debug for PluginLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginLoader")
            .field("catalog", &self.catalog.iter().map(|p| p.id()).collect::<Vec<_>>())
            .field("initialized", &self.initialized)
            .field("registered", &self.registered)
            .finish()
    }
}
