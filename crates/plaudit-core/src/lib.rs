// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Plaudit mirroring engine.
//!
//! This crate provides the domain types, the error type, and the trait
//! definitions for the three external collaborators: the preference store,
//! the reward dispatcher, and the chat connector. The engine crate builds
//! entirely on the contracts defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PlauditError;
pub use types::{
    BonusReceipt, BonusRequest, ChannelKind, DmPreference, MirrorFailure, MirrorMode,
    Participant, PointDirection, PointEvent, Preference, PreferencePatch, UserId,
};

// Re-export all collaborator traits at crate root.
pub use traits::{Connector, PreferenceStore, RewardDispatcher};
