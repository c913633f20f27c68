// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry: the single source of truth for which modalities exist.
//!
//! The `PluginRegistry` stores plugins keyed by id in registration order.
//! State lives in an immutable snapshot that writers replace atomically, so
//! reads never block and always see a consistent set. Every query is a fresh
//! projection over the current snapshot; nothing is cached.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use meridian_core::ModalityPlugin;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

/// One row of the per-indication comparison projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub id: String,
    pub name: String,
    pub icon: String,
    /// Overall effectiveness from the plugin's comparison metrics.
    pub effectiveness: f64,
    /// Number of protocols matching the indication.
    pub protocols: usize,
}

/// Totals across every registered plugin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub total_plugins: usize,
    pub total_protocols: usize,
    pub total_techniques: usize,
}

#[derive(Clone, Default)]
struct Snapshot {
    order: Vec<String>,
    plugins: HashMap<String, Arc<dyn ModalityPlugin>>,
}

impl Snapshot {
    fn ordered(&self) -> impl Iterator<Item = &Arc<dyn ModalityPlugin>> {
        self.order.iter().filter_map(|id| self.plugins.get(id))
    }
}

/// Registry of treatment modality plugins.
///
/// Shared as `Arc<PluginRegistry>` between the loader (the only writer during
/// bootstrap), the composer, and consumer bindings.
pub struct PluginRegistry {
    state: ArcSwap<Snapshot>,
    revision: watch::Sender<u64>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: ArcSwap::from_pointee(Snapshot::default()),
            revision,
        }
    }

    /// Insert a plugin, replacing any plugin with the same id wholesale.
    ///
    /// A replaced plugin keeps its original position in registration order.
    /// Returns true if an existing registration was replaced.
    pub fn register(&self, plugin: Arc<dyn ModalityPlugin>) -> bool {
        let id = plugin.id().to_string();
        let previous = self.state.rcu(|current| {
            let mut next = Snapshot::clone(current);
            if next.plugins.insert(id.clone(), Arc::clone(&plugin)).is_none() {
                next.order.push(id.clone());
            }
            next
        });
        let replaced = previous.plugins.contains_key(&id);
        self.bump();

        if replaced {
            debug!(plugin_id = %id, "plugin re-registered, previous definition replaced");
        } else {
            info!(plugin_id = %id, "plugin registered");
        }
        replaced
    }

    /// Remove a plugin. Returns false (and changes nothing) if it was absent.
    pub fn unregister(&self, id: &str) -> bool {
        if !self.state.load().plugins.contains_key(id) {
            return false;
        }
        let previous = self.state.rcu(|current| {
            let mut next = Snapshot::clone(current);
            if next.plugins.remove(id).is_some() {
                next.order.retain(|existing| existing != id);
            }
            next
        });
        let removed = previous.plugins.contains_key(id);
        if removed {
            self.bump();
            info!(plugin_id = %id, "plugin unregistered");
        }
        removed
    }

    /// Look up a plugin by id. Absence is not an error.
    pub fn get(&self, id: &str) -> Option<Arc<dyn ModalityPlugin>> {
        self.state.load().plugins.get(id).cloned()
    }

    /// All plugins in registration order.
    pub fn all(&self) -> Vec<Arc<dyn ModalityPlugin>> {
        self.state.load().ordered().cloned().collect()
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> Vec<String> {
        self.state.load().order.clone()
    }

    /// Plugins with at least one protocol matching `indication`.
    pub fn for_indication(&self, indication: &str) -> Vec<Arc<dyn ModalityPlugin>> {
        self.state
            .load()
            .ordered()
            .filter(|p| !p.protocols_for_indication(indication).is_empty())
            .cloned()
            .collect()
    }

    /// Comparison rows for every plugin treating `indication`.
    pub fn comparison_data(&self, indication: &str) -> Vec<ComparisonRow> {
        self.for_indication(indication)
            .iter()
            .map(|plugin| {
                let metadata = plugin.metadata();
                ComparisonRow {
                    id: metadata.id.clone(),
                    name: metadata.name.clone(),
                    icon: metadata.icon.clone(),
                    effectiveness: plugin.comparison_data().effectiveness,
                    protocols: plugin.protocols_for_indication(indication).len(),
                }
            })
            .collect()
    }

    pub fn stats(&self) -> RegistryStats {
        let snapshot = self.state.load();
        snapshot
            .ordered()
            .fold(RegistryStats::default(), |mut stats, plugin| {
                stats.total_plugins += 1;
                stats.total_protocols += plugin.protocols().len();
                stats.total_techniques += plugin.techniques().len();
                stats
            })
    }

    /// Plugins whose search terms contain `query`, ignoring case.
    ///
    /// An empty query returns every plugin.
    pub fn search(&self, query: &str) -> Vec<Arc<dyn ModalityPlugin>> {
        let query = query.trim().to_lowercase();
        self.state
            .load()
            .ordered()
            .filter(|plugin| {
                query.is_empty()
                    || plugin
                        .search_terms()
                        .iter()
                        .any(|term| term.to_lowercase().contains(&query))
            })
            .cloned()
            .collect()
    }

    /// Receiver that observes a new revision after every register/unregister.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Monotonic counter of write operations.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Returns the number of registered plugins.
    pub fn len(&self) -> usize {
        self.state.load().plugins.len()
    }

    /// Returns true if no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.state.load().plugins.is_empty()
    }

    fn bump(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.ids())
            .field("revision", &self.revision())
            .finish()
    }
}
