// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./meridian.toml` > `~/.config/meridian/meridian.toml` > `/etc/meridian/meridian.toml`
//! with environment variable overrides via `MERIDIAN_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::MeridianConfig;

pub(crate) const SYSTEM_CONFIG_PATH: &str = "/etc/meridian/meridian.toml";
pub(crate) const LOCAL_CONFIG_PATH: &str = "meridian.toml";
pub(crate) const USER_CONFIG_SUFFIX: &str = "meridian/meridian.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/meridian/meridian.toml` (system-wide)
/// 3. `~/.config/meridian/meridian.toml` (user XDG config)
/// 4. `./meridian.toml` (local directory)
/// 5. `MERIDIAN_*` environment variables
pub fn load_config() -> Result<MeridianConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<MeridianConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MeridianConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
///
/// Unlike the search hierarchy, the file must exist.
pub fn load_config_from_path(path: &Path) -> Result<MeridianConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MeridianConfig::default()))
        .merge(Toml::file_exact(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(MeridianConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join(USER_CONFIG_SUFFIX))
                .unwrap_or_default(),
        ))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `MERIDIAN_BINDINGS_READINESS_TIMEOUT_MS` must map to
/// `bindings.readiness_timeout_ms`, and `MERIDIAN_PLUGINS_ENABLED_MASSAGE` to
/// `plugins.enabled.massage`.
fn env_provider() -> Env {
    Env::prefixed("MERIDIAN_").map(|key| {
        let key_str = key.as_str();
        let mapped = if let Some(rest) = key_str.strip_prefix("plugins_enabled_") {
            format!("plugins.enabled.{rest}")
        } else if let Some(rest) = key_str.strip_prefix("app_") {
            format!("app.{rest}")
        } else if let Some(rest) = key_str.strip_prefix("bindings_") {
            format!("bindings.{rest}")
        } else {
            key_str.to_string()
        };
        mapped.into()
    })
}
