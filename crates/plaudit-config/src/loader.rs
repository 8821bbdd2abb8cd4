// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./plaudit.toml` > `~/.config/plaudit/plaudit.toml` > `/etc/plaudit/plaudit.toml`
//! with environment variable overrides via `PLAUDIT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PlauditConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/plaudit/plaudit.toml` (system-wide)
/// 3. `~/.config/plaudit/plaudit.toml` (user XDG config)
/// 4. `./plaudit.toml` (local directory)
/// 5. `PLAUDIT_*` environment variables
pub fn load_config() -> Result<PlauditConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlauditConfig::default()))
        .merge(Toml::file("/etc/plaudit/plaudit.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("plaudit/plaudit.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("plaudit.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config input.
pub fn load_config_from_str(toml_content: &str) -> Result<PlauditConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlauditConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PlauditConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlauditConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that key names
/// containing underscores stay unambiguous: `PLAUDIT_DIALOG_TIMEOUT_SECS`
/// must map to `dialog.timeout_secs`, not `dialog.timeout.secs`.
fn env_provider() -> Env {
    Env::prefixed("PLAUDIT_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: PLAUDIT_DIALOG_TIMEOUT_SECS -> "dialog_timeout_secs"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("dialog_", "dialog.", 1)
            .replacen("tips_", "tips.", 1);
        mapped.into()
    })
}
