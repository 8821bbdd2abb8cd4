// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Preference store trait for the per-user consent document backend.

use async_trait::async_trait;

use crate::error::PlauditError;
use crate::types::{Preference, PreferencePatch, UserId};

/// Read/write access to per-identity mirroring preferences.
///
/// One document per identity. Absence of a field is semantically meaningful
/// and must not be conflated with an explicit false/zero value; `update`
/// only touches the fields present in the patch.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Fetch the preference record for an identity, `None` if unknown.
    async fn get(&self, identity: &UserId) -> Result<Option<Preference>, PlauditError>;

    /// Apply a partial update to an identity's record, creating it if absent.
    async fn update(
        &self,
        identity: &UserId,
        patch: PreferencePatch,
    ) -> Result<(), PlauditError>;
}
