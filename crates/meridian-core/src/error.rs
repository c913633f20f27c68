// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Meridian modality framework.

use thiserror::Error;

/// The primary error type used across the plugin contract, loader, and bindings.
///
/// Registry and composer queries are total and never return this type;
/// it only surfaces from plugin initialization, configuration, and the
/// readiness wait.
#[derive(Debug, Error)]
pub enum MeridianError {
    /// A plugin definition failed shape validation during initialization.
    #[error("validation failed for plugin `{plugin_id}`: {message}")]
    Validation { plugin_id: String, message: String },

    /// Requested plugin id is not registered.
    #[error("plugin not found: {id}")]
    PluginNotFound { id: String },

    /// Configuration errors (invalid TOML, unknown keys, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Waiting for registry readiness exceeded the configured window.
    #[error("registry not ready after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// The loader finished without registering a single plugin.
    #[error("loader completed but no plugins were registered")]
    NoPluginsLoaded,

    /// A modality document could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MeridianError {
    /// Shorthand for a [`MeridianError::Validation`] error.
    pub fn validation(plugin_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            plugin_id: plugin_id.into(),
            message: message.into(),
        }
    }
}
