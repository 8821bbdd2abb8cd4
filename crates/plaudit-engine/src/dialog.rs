// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dialog flow state machine, modelled as data.
//!
//! States, recognized replies, and the transition table are plain values so
//! the whole flow is enumerable and unit-testable without driving a live
//! interactive session. The asynchronous parts (suspension, timeout) live in
//! [`crate::session`]; executing the side effects of a transition is the
//! service's job.

use plaudit_core::types::{MirrorMode, PreferencePatch};

/// A waiting-for-reply state of an interactive flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    /// Three-way mode choice: `always`, `prompt`, or `never`.
    AwaitModeChoice,
    /// Yes/no confirmation for one specific send.
    AwaitConfirm,
    /// Numeric prompt for the per-grant bonus amount.
    AwaitAmount,
}

/// How a flow was started. Decides whether completing the mode choice can
/// lead to a send (live grant) or only to an acknowledgment (command).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOrigin {
    /// Triggered by an inbound point grant.
    LiveGrant,
    /// Triggered by a standalone configuration command.
    Command,
}

/// A recognized reply in some dialog state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Mode(MirrorMode),
    Confirm(bool),
    Amount(u32),
}

/// Result of feeding a recognized reply into the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Preference fields to persist before acting on `next`.
    pub patch: Option<PreferencePatch>,
    pub next: Next,
}

/// What the flow does after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    /// Issue the prompt for a nested state and keep listening.
    Enter(DialogState),
    /// Perform the mirrored send, then terminate.
    Dispatch,
    /// Terminate with an acknowledgment.
    Done(Ack),
}

/// Terminal acknowledgments, rendered to text by the prompts module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    /// Mode persisted via a configuration command.
    ModeSaved,
    /// User answered `no` to a confirmation.
    Declined,
    /// User chose `never` during a live-grant onboarding.
    OptedOut,
    /// Amount persisted via the amount command.
    AmountSaved(u32),
}

/// Match free text against the replies accepted in `state`.
///
/// Matching is case-insensitive and substring-tolerant, like the original
/// chat commands. Unrecognized text returns `None`: no transition, and the
/// session stays open until its deadline. In `AwaitAmount` the first run of
/// digits is taken; zero is not a valid amount.
pub fn parse_reply(state: DialogState, text: &str) -> Option<Reply> {
    let lower = text.to_lowercase();
    match state {
        DialogState::AwaitModeChoice => {
            if lower.contains("always") {
                Some(Reply::Mode(MirrorMode::Always))
            } else if lower.contains("prompt") {
                Some(Reply::Mode(MirrorMode::Prompt))
            } else if lower.contains("never") {
                Some(Reply::Mode(MirrorMode::Never))
            } else {
                None
            }
        }
        DialogState::AwaitConfirm => {
            if lower.contains("yes") {
                Some(Reply::Confirm(true))
            } else if lower.contains("no") {
                Some(Reply::Confirm(false))
            } else {
                None
            }
        }
        DialogState::AwaitAmount => {
            let digits: String = lower
                .chars()
                .skip_while(|c| !c.is_ascii_digit())
                .take_while(char::is_ascii_digit)
                .collect();
            match digits.parse::<u32>() {
                Ok(n) if n >= 1 => Some(Reply::Amount(n)),
                _ => None,
            }
        }
    }
}

/// The transition table.
///
/// Unreachable (state, reply) combinations resolve to a harmless no-op
/// transition re-entering the same state; `parse_reply` never produces them.
pub fn transition(state: DialogState, reply: Reply, origin: DialogOrigin) -> Transition {
    match (state, reply) {
        (DialogState::AwaitModeChoice, Reply::Mode(mode)) => {
            let patch = Some(PreferencePatch::mode(mode));
            let next = match (mode, origin) {
                (MirrorMode::Always, DialogOrigin::LiveGrant) => Next::Dispatch,
                (MirrorMode::Prompt, DialogOrigin::LiveGrant) => {
                    Next::Enter(DialogState::AwaitConfirm)
                }
                (MirrorMode::Never, DialogOrigin::LiveGrant) => Next::Done(Ack::OptedOut),
                // The configuration command acknowledges all three choices
                // the same way and never dispatches.
                (_, DialogOrigin::Command) => Next::Done(Ack::ModeSaved),
                // `Unset` is not a recognizable reply.
                (MirrorMode::Unset, DialogOrigin::LiveGrant) => {
                    Next::Enter(DialogState::AwaitModeChoice)
                }
            };
            Transition { patch, next }
        }
        (DialogState::AwaitConfirm, Reply::Confirm(yes)) => Transition {
            patch: None,
            next: if yes { Next::Dispatch } else { Next::Done(Ack::Declined) },
        },
        (DialogState::AwaitAmount, Reply::Amount(n)) => Transition {
            patch: Some(PreferencePatch::amount(n)),
            next: Next::Done(Ack::AmountSaved(n)),
        },
        (state, _) => Transition {
            patch: None,
            next: Next::Enter(state),
        },
    }
}
