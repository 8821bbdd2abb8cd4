// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound half of the chat-platform connector.
//!
//! Message transport, room/DM semantics, and command-pattern delivery are
//! owned by the host bot; the engine only emits through this trait.

use async_trait::async_trait;

use crate::error::PlauditError;
use crate::types::{MirrorFailure, UserId};

/// Outbound messaging surface of the chat platform.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Post a message visible to everyone in a room.
    async fn broadcast(&self, room: &str, text: &str) -> Result<(), PlauditError>;

    /// Send a direct message to one identity. Used for all dialog prompts
    /// and for DM-gated notifications.
    async fn direct(&self, user: &UserId, text: &str) -> Result<(), PlauditError>;

    /// Emit the structured missing-contact failure signal for any
    /// operator-facing audit listener.
    async fn mirror_failed(&self, failure: MirrorFailure) -> Result<(), PlauditError>;
}
