// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composes the follow-up messages shown after a bonus attempt.
//!
//! Pure over its inputs apart from the injected RNG, so tip behavior is
//! reproducible in tests with a seeded generator.

use rand::Rng;

use plaudit_core::types::{DmPreference, PointEvent, Preference};

/// The messages produced for one bonus outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Acknowledgment for the room the grant happened in. Always sent.
    pub room: String,
    /// Sender-facing DM, suppressed when the effective DM preference is off.
    pub dm: Option<String>,
}

/// Compose the success notification for an issued bonus.
///
/// The room acknowledgment is unconditional. The DM names the issued amount
/// and the sender's remaining balance and is dropped entirely when the
/// sender has DMs disabled. Two onboarding tips may be appended, each behind
/// an independent `tip_probability` roll: the amount tip while the sender
/// still sends the default amount, and the opt-out tip while the DM
/// preference has never been explicitly set.
#[allow(clippy::too_many_arguments)]
pub fn compose_success<R: Rng>(
    event: &PointEvent,
    preference: &Preference,
    sent_amount: u32,
    amount_display: &str,
    balance_display: &str,
    bot: &str,
    tip_probability: f64,
    rng: &mut R,
) -> Notification {
    let recipient = &event.recipient.handle;
    let room = format!("We sent a bonus for {amount_display} to @{recipient}.");

    if !preference.dm_notify.effective() {
        return Notification { room, dm: None };
    }

    let mut dm = format!(
        "We sent @{recipient} {amount_display}. You now have {balance_display} left."
    );

    let at_default_amount = preference.mirror_amount.is_none() || sent_amount == 1;
    if at_default_amount && rng.gen_bool(tip_probability) {
        dm.push_str(&format!(
            "\n\nDid you know you could change the amount you send per {bot} point?\n\
             Just DM @{bot} `change my bonus points setting` and respond with a number.\n\
             :tada: You're all set."
        ));
    }

    if preference.dm_notify == DmPreference::Unset && rng.gen_bool(tip_probability) {
        dm.push_str(&format!(
            "\n\nDon't like these DMs about bonuses?\n\
             Just DM @{bot} `toggle dm about bonus` and we will turn off this DM."
        ));
    }

    Notification { room, dm: Some(dm) }
}

/// Compose the room-visible failure message for a rejected dispatch.
pub fn compose_failure(message: &str) -> String {
    format!("Sorry, there was an issue sending your bonus: {message}")
}
