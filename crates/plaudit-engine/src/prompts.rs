// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text of every dialog prompt, acknowledgment, and notice.
//!
//! Kept in one place so the flows stay free of string assembly and the
//! wording can be checked in isolation.

use crate::dialog::Ack;

/// The three-way mode choice prompt, used by onboarding and the
/// configuration command alike.
pub fn mode_choice(bot: &str) -> String {
    format!(
        "{bot} is set up to allow you to also send a bonus when you send a {bot} point! \
         There are three options for how {bot} can do this:\n\
         \u{2022} Always send a bonus when you send a {bot} point.\n\
         \u{2022} Prompt every time to ask whether a bonus should be included.\n\
         \u{2022} Never include a bonus with {bot} points.\n\n\
         How would you like {bot} to behave? (You can always change this later \
         by DMing me `change my bonus settings`)\n\
         [ `Always` | `Prompt` | `Never` ]"
    )
}

/// Yes/no confirmation right after the user picked `prompt` during
/// onboarding, while the triggering grant is still pending.
pub fn confirm_after_onboarding(recipient: &str, amount: u32) -> String {
    format!(
        "In that case, do you want to send @{recipient} a bonus worth {amount}?\n\
         [ `Yes` | `No` ]"
    )
}

/// Yes/no confirmation when the stored mode is already `prompt`.
pub fn confirm_send(bot: &str, recipient: &str, amount: u32) -> String {
    format!(
        "You just gave @{recipient} a {bot} point and mirroring is enabled, \
         would you like to send them {amount} bonus point(s) as well?\n\
         [ `Yes` | `No` ]"
    )
}

/// Numeric prompt of the amount command, showing the current value.
pub fn amount_choice(bot: &str, current: u32) -> String {
    format!(
        "{bot} can send bonus point(s) when you send a {bot} point!\n\
         Currently you are set to send *{current}* point(s). \
         Respond with a number to change this amount."
    )
}

/// Terminal acknowledgment for a completed transition.
pub fn ack(bot: &str, outcome: Ack) -> String {
    match outcome {
        Ack::ModeSaved => {
            format!("Thank you! We've updated your {bot} bonus settings.")
        }
        Ack::Declined => "Ah, alright. Next time!".to_string(),
        Ack::OptedOut => "Alright! No worries. If you ever change your mind just let me know \
             (DM me `change my bonus settings`)!"
            .to_string(),
        Ack::AmountSaved(n) => {
            format!("Thank you! We've updated your {bot} bonus amount to *{n}*.")
        }
    }
}

/// Notice sent when a dialog prompt expires without an accepted reply.
pub fn timeout_notice() -> String {
    "We didn't receive your response in time. Please try again.".to_string()
}

/// Instructional reply when a configuration command is used outside a DM.
pub fn dm_only(bot: &str) -> String {
    format!("Please use this function of {bot} in a DM.")
}

/// Reply when the command sender has no account in the preference store.
pub fn account_not_found() -> String {
    "I'm sorry, we could not find your account. Please contact an admin.".to_string()
}

/// Confirmation after the DM toggle, reporting the new effective state.
pub fn dm_toggled(bot: &str, enabled: bool) -> String {
    let state = if enabled {
        format!("{bot} will DM you again.")
    } else {
        format!("{bot} won't DM you any more.")
    };
    format!("Thank you! We've updated your {bot} DM settings. {state}")
}
