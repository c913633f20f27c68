// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde cannot express: known log levels, a
//! bounded readiness timeout, and well-formed plugin ids.

use crate::diagnostic::ConfigError;
use crate::model::MeridianConfig;

/// Log levels accepted by `app.log_level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Largest accepted `bindings.readiness_timeout_ms`.
pub const MAX_READINESS_TIMEOUT_MS: u64 = 60_000;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns every validation error found rather than stopping at the first.
pub fn validate_config(config: &MeridianConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.app.log_level.trim().to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` must be one of {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.app.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "app.name must not be empty".to_string(),
        });
    }

    let timeout = config.bindings.readiness_timeout_ms;
    if timeout == 0 || timeout > MAX_READINESS_TIMEOUT_MS {
        errors.push(ConfigError::Validation {
            message: format!(
                "bindings.readiness_timeout_ms must be between 1 and {MAX_READINESS_TIMEOUT_MS}, got {timeout}"
            ),
        });
    }

    for id in config.plugins.enabled.keys() {
        if id.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "plugins.enabled contains an empty plugin id".to_string(),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
