// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Meridian.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level Meridian configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MeridianConfig {
    /// Application identity and logging.
    #[serde(default)]
    pub app: AppConfig,

    /// Consumer binding behavior.
    #[serde(default)]
    pub bindings: BindingsConfig,

    /// Per-plugin enablement.
    #[serde(default)]
    pub plugins: PluginsConfig,
}

/// Application identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name used in log output.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "meridian".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// How consumer bindings wait for the registry to become ready.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BindingsConfig {
    /// Upper bound on the readiness wait, in milliseconds.
    #[serde(default = "default_readiness_timeout_ms")]
    pub readiness_timeout_ms: u64,
}

impl Default for BindingsConfig {
    fn default() -> Self {
        Self {
            readiness_timeout_ms: default_readiness_timeout_ms(),
        }
    }
}

impl BindingsConfig {
    pub fn readiness_timeout(&self) -> Duration {
        Duration::from_millis(self.readiness_timeout_ms)
    }
}

fn default_readiness_timeout_ms() -> u64 {
    5000
}

/// Plugin enablement overrides keyed by plugin id.
///
/// Plugins not listed are enabled.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginsConfig {
    #[serde(default)]
    pub enabled: BTreeMap<String, bool>,
}

impl PluginsConfig {
    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled.get(id).copied().unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = MeridianConfig::default();
        assert_eq!(config.app.name, "meridian");
        assert_eq!(config.app.log_level, "info");
        assert_eq!(config.bindings.readiness_timeout(), Duration::from_secs(5));
        assert!(config.plugins.enabled.is_empty());
    }

    #[test]
    fn unlisted_plugins_are_enabled() {
        let mut plugins = PluginsConfig::default();
        plugins.enabled.insert("massage".to_string(), false);
        assert!(!plugins.is_enabled("massage"));
        assert!(plugins.is_enabled("acupressure"));
    }

    #[test]
    fn plugins_table_deserializes() {
        let toml_str = r#"
[plugins.enabled]
acupressure = true
hydrotherapy = false
"#;
        let config: MeridianConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.plugins.enabled.len(), 2);
        assert!(!config.plugins.is_enabled("hydrotherapy"));
    }
}
