// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reward dispatcher trait for the external rewards platform.

use async_trait::async_trait;

use crate::error::PlauditError;
use crate::types::{BonusReceipt, BonusRequest};

/// Performs the external bonus call.
///
/// A bonus is a user-visible action: the engine awaits one call per grant
/// and never retries, surfacing rejections through the notification path.
#[async_trait]
pub trait RewardDispatcher: Send + Sync {
    /// Issue a bonus on the rewards platform.
    ///
    /// `Ok(BonusReceipt::Rejected { .. })` is a structured platform-side
    /// refusal; `Err` is a transport-level failure.
    async fn send(&self, request: &BonusRequest) -> Result<BonusReceipt, PlauditError>;
}
