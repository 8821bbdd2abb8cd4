// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pattern matching for the standalone configuration commands.

use std::sync::LazyLock;

use regex::Regex;

/// A recognized user-initiated configuration command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Re-run the three-way mode choice.
    Configure,
    /// Change the per-grant bonus amount.
    SetAmount,
    /// Flip the DM notification opt-out.
    ToggleDm,
}

static SET_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i).*change.*\b(?:mirror|bonus)\b.*(?:points|amount).*")
        .expect("static pattern compiles")
});

static CONFIGURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i).*change.*\b(?:mirror|bonus)\s?(?:integration)?\s?(?:configuration|config|response|settings?).*",
    )
    .expect("static pattern compiles")
});

static TOGGLE_DM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i).*toggle dm about (?:mirror|bonus)").expect("static pattern compiles")
});

/// Match free text against the three command patterns.
///
/// Case-insensitive and tolerant of surrounding words, like the original
/// chat patterns. The amount pattern is checked before the configuration
/// pattern so that a text naming both an amount and the settings routes to
/// the more specific amount flow.
pub fn parse_command(text: &str) -> Option<Command> {
    if SET_AMOUNT.is_match(text) {
        Some(Command::SetAmount)
    } else if CONFIGURE.is_match(text) {
        Some(Command::Configure)
    } else if TOGGLE_DM.is_match(text) {
        Some(Command::ToggleDm)
    } else {
        None
    }
}
