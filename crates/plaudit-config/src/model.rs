// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Plaudit mirroring engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Plaudit configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlauditConfig {
    /// Bot identity settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Interactive dialog settings.
    #[serde(default)]
    pub dialog: DialogConfig,

    /// Onboarding tip settings.
    #[serde(default)]
    pub tips: TipsConfig,
}

/// Bot identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the bot, interpolated into dialog prompts.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "plaudit".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Interactive dialog configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DialogConfig {
    /// Seconds a dialog prompt waits for a matching reply before the
    /// session is discarded with a timeout notice.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    120
}

/// Onboarding tip configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TipsConfig {
    /// Probability in [0, 1] that an eligible tip is appended to a
    /// success DM. Each tip rolls independently.
    #[serde(default = "default_tip_probability")]
    pub probability: f64,
}

impl Default for TipsConfig {
    fn default() -> Self {
        Self {
            probability: default_tip_probability(),
        }
    }
}

fn default_tip_probability() -> f64 {
    0.5
}
