// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event-driven mirroring core for Plaudit.
//!
//! The [`service::MirrorService`] is the central coordinator that:
//! - Validates inbound point-grant events
//! - Decides whether a mirrored bonus should be sent, and how much
//! - Drives the multi-turn consent dialogs with timeout recovery
//! - Dispatches the bonus and composes the resulting notifications
//!
//! The chat connector, preference store, and reward dispatcher are external
//! collaborators reached through the traits in `plaudit-core`.

pub mod command;
pub mod decision;
pub mod dialog;
pub mod notify;
pub mod prompts;
pub mod service;
pub mod session;

pub use command::{parse_command, Command};
pub use decision::{decide, Action, SuppressReason};
pub use dialog::{DialogOrigin, DialogState};
pub use service::{EngineConfig, MirrorService};
pub use session::SessionTable;
