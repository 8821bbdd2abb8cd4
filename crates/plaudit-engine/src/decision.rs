// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure mapping from (event, stored preference) to a mirroring action.
//!
//! The function is total over the cross-product of its inputs, so the whole
//! decision surface can be table-tested without any dialog machinery.

use plaudit_core::types::{MirrorMode, PointDirection, PointEvent, Preference};

/// What the engine should do with an inbound point grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Do not mirror. The reason decides whether anything is surfaced.
    Suppress(SuppressReason),
    /// No mode stored yet: collect one interactively before any send.
    RunOnboarding { amount: u32 },
    /// Stored mode is `Always`: send without asking.
    SendImmediately { amount: u32 },
    /// Stored mode is `Prompt`: one yes/no confirmation turn, then send.
    ConfirmThenSend { amount: u32 },
}

/// Why a grant is not mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// Points were taken away, not given. Checked before anything else so a
    /// decrement can never walk the sender through onboarding.
    Decremented,
    /// A contact address is missing on either side. The caller emits the
    /// operator-facing failure signal.
    MissingContact,
    /// Stored mode is `Never`.
    OptedOut,
}

/// Decide how to handle `event` given the sender's stored preference.
///
/// A missing preference record behaves exactly like a record with every
/// field unset: amount 1, mode `Unset`.
pub fn decide(event: &PointEvent, preference: Option<&Preference>) -> Action {
    if event.direction != PointDirection::Increment {
        return Action::Suppress(SuppressReason::Decremented);
    }

    if event.sender.contact().is_none() || event.recipient.contact().is_none() {
        return Action::Suppress(SuppressReason::MissingContact);
    }

    let amount = preference.map(Preference::resolved_amount).unwrap_or(1);
    let mode = preference.map(|p| p.mirror_mode).unwrap_or_default();

    match mode {
        MirrorMode::Unset => Action::RunOnboarding { amount },
        MirrorMode::Always => Action::SendImmediately { amount },
        MirrorMode::Prompt => Action::ConfirmThenSend { amount },
        MirrorMode::Never => Action::Suppress(SuppressReason::OptedOut),
    }
}
