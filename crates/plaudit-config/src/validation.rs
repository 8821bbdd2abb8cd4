// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as probability ranges and non-zero timeouts.

use thiserror::Error;

use crate::model::PlauditConfig;

/// A single configuration validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {message}")]
    Validation { message: String },
}

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &PlauditConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.agent.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.name must not be empty".to_string(),
        });
    }

    if config.dialog.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "dialog.timeout_secs must be at least 1".to_string(),
        });
    }

    let p = config.tips.probability;
    if !(0.0..=1.0).contains(&p) || p.is_nan() {
        errors.push(ConfigError::Validation {
            message: format!("tips.probability must be within [0, 1], got {p}"),
        });
    }

    let level = config.agent.log_level.as_str();
    if !["trace", "debug", "info", "warn", "error"].contains(&level) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of trace/debug/info/warn/error, got `{level}`"
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
