// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory preference store for deterministic testing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use plaudit_core::traits::store::PreferenceStore;
use plaudit_core::types::{Preference, PreferencePatch, UserId};
use plaudit_core::PlauditError;

/// A `PreferenceStore` backed by a hash map.
///
/// `update` upserts like the production document store: a patch against an
/// unknown identity creates a fresh record first. `get` against an unknown
/// identity returns `None` unless the record was seeded or written.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    records: Arc<Mutex<HashMap<UserId, Preference>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a full record, as if the user had completed earlier dialogs.
    pub async fn insert(&self, preference: Preference) {
        self.records
            .lock()
            .await
            .insert(preference.identity.clone(), preference);
    }

    /// Seed an empty record so the identity resolves but nothing is answered.
    pub async fn insert_blank(&self, identity: UserId) {
        self.insert(Preference::new(identity)).await;
    }

    /// Snapshot of one record for assertions.
    pub async fn record(&self, identity: &UserId) -> Option<Preference> {
        self.records.lock().await.get(identity).cloned()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, identity: &UserId) -> Result<Option<Preference>, PlauditError> {
        Ok(self.records.lock().await.get(identity).cloned())
    }

    async fn update(
        &self,
        identity: &UserId,
        patch: PreferencePatch,
    ) -> Result<(), PlauditError> {
        let mut records = self.records.lock().await;
        let record = records
            .entry(identity.clone())
            .or_insert_with(|| Preference::new(identity.clone()));
        record.apply(patch);
        Ok(())
    }
}
