// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the collaborator traits and the engine.
//!
//! The preference record keeps absence explicit: a field a user has never
//! answered is `Unset`/`None`, which is distinct from an explicit `Never`,
//! `Disabled`, or zero value.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Opaque stable identifier for a chat-platform user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One side of a point grant: identity, display handle, and the contact
/// address the reward dispatcher resolves the account with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: UserId,
    pub handle: String,
    pub email: Option<String>,
}

impl Participant {
    /// The resolvable contact address, if any. An empty string counts as missing.
    pub fn contact(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.is_empty())
    }
}

/// Direction of a point grant. Only increments are eligible for mirroring.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PointDirection {
    Increment,
    Decrement,
}

/// An inbound point-grant event from the points ledger.
///
/// Transient: constructed upstream, consumed once by the engine, never
/// persisted. The resolved mirror amount is not part of the event; the
/// decision engine derives it from the sender's preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointEvent {
    pub sender: Participant,
    pub recipient: Participant,
    pub direction: PointDirection,
    /// Room the grant occurred in, used for room-visible notifications.
    pub room: String,
    /// Free-text justification, already sanitized upstream.
    pub reason: String,
}

/// Whether and how a user wants grants mirrored into the rewards platform.
///
/// `Unset` is the state before the user has ever answered the setup dialog
/// and is distinct from `Never`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MirrorMode {
    #[default]
    Unset,
    Always,
    Prompt,
    Never,
}

/// Whether the user wants DM notifications after a mirrored bonus.
///
/// Explicit three-valued enum: `Unset` (never answered, DMs still sent and
/// onboarding tips still eligible) is distinct from `Disabled`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DmPreference {
    #[default]
    Unset,
    Enabled,
    Disabled,
}

impl DmPreference {
    /// The effective yes/no value. `Unset` counts as enabled.
    pub fn effective(self) -> bool {
        !matches!(self, DmPreference::Disabled)
    }

    /// The value after a toggle of the effective state. The first toggle
    /// from `Unset` always lands on `Disabled`.
    pub fn toggled(self) -> Self {
        if self.effective() {
            DmPreference::Disabled
        } else {
            DmPreference::Enabled
        }
    }
}

/// Per-identity mirroring preference, one document per user in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub identity: UserId,
    #[serde(default)]
    pub mirror_mode: MirrorMode,
    /// Bonus units sent per mirrored grant. Absent means the default of 1;
    /// when set it is always >= 1.
    #[serde(default)]
    pub mirror_amount: Option<u32>,
    #[serde(default)]
    pub dm_notify: DmPreference,
}

impl Preference {
    /// A fresh record with nothing answered yet.
    pub fn new(identity: UserId) -> Self {
        Self {
            identity,
            mirror_mode: MirrorMode::Unset,
            mirror_amount: None,
            dm_notify: DmPreference::Unset,
        }
    }

    /// The mirror amount with the default applied.
    pub fn resolved_amount(&self) -> u32 {
        self.mirror_amount.unwrap_or(1)
    }

    /// Merge a partial update into this record. `None` fields are left untouched.
    pub fn apply(&mut self, patch: PreferencePatch) {
        if let Some(mode) = patch.mirror_mode {
            self.mirror_mode = mode;
        }
        if let Some(amount) = patch.mirror_amount {
            self.mirror_amount = Some(amount);
        }
        if let Some(dm) = patch.dm_notify {
            self.dm_notify = dm;
        }
    }
}

/// Partial update document for [`PreferenceStore::update`].
///
/// [`PreferenceStore::update`]: crate::traits::PreferenceStore::update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencePatch {
    pub mirror_mode: Option<MirrorMode>,
    pub mirror_amount: Option<u32>,
    pub dm_notify: Option<DmPreference>,
}

impl PreferencePatch {
    pub fn mode(mode: MirrorMode) -> Self {
        Self {
            mirror_mode: Some(mode),
            ..Self::default()
        }
    }

    pub fn amount(amount: u32) -> Self {
        Self {
            mirror_amount: Some(amount),
            ..Self::default()
        }
    }

    pub fn dm(dm: DmPreference) -> Self {
        Self {
            dm_notify: Some(dm),
            ..Self::default()
        }
    }
}

/// Input for one reward dispatch call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusRequest {
    pub sender_contact: String,
    pub recipient_contact: String,
    pub amount: u32,
    pub reason: String,
}

/// Structured result of a reward dispatch call.
///
/// A rejection is an expected outcome, surfaced to the user and never
/// retried; transport-level failures are [`PlauditError::Dispatch`] instead.
///
/// [`PlauditError::Dispatch`]: crate::error::PlauditError::Dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusReceipt {
    Issued {
        /// Issued amount with currency formatting, e.g. "3 points".
        amount_display: String,
        /// Sender's remaining giving balance with currency formatting.
        balance_display: String,
    },
    Rejected {
        message: String,
    },
}

/// Operator-facing signal emitted when a grant cannot be mirrored because a
/// contact address is missing on either side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorFailure {
    pub sender: UserId,
    pub recipient: UserId,
    pub room: String,
    pub message: String,
}

/// Originating context of an inbound command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// A direct/private channel with the bot.
    Direct,
    /// A shared room. Configuration commands are rejected here.
    Room,
}
