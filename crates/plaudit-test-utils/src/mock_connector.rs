// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat connector capturing every outbound message for assertion.
//!
//! Tests that drive a dialog concurrently can block on [`wait_for_directs`]
//! until the engine has issued its prompt before injecting the reply.
//!
//! [`wait_for_directs`]: MockConnector::wait_for_directs

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use plaudit_core::traits::connector::Connector;
use plaudit_core::types::{MirrorFailure, UserId};
use plaudit_core::PlauditError;

/// A `Connector` that records broadcasts, DMs, and failure signals.
#[derive(Default)]
pub struct MockConnector {
    broadcasts: Arc<Mutex<Vec<(String, String)>>>,
    directs: Arc<Mutex<Vec<(UserId, String)>>>,
    failures: Arc<Mutex<Vec<MirrorFailure>>>,
    notify: Arc<Notify>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// All room broadcasts so far, as `(room, text)` pairs.
    pub async fn broadcasts(&self) -> Vec<(String, String)> {
        self.broadcasts.lock().await.clone()
    }

    /// All direct messages so far, as `(user, text)` pairs.
    pub async fn directs(&self) -> Vec<(UserId, String)> {
        self.directs.lock().await.clone()
    }

    /// All mirror-failure signals so far.
    pub async fn failures(&self) -> Vec<MirrorFailure> {
        self.failures.lock().await.clone()
    }

    /// Suspend until at least `count` direct messages have been sent.
    pub async fn wait_for_directs(&self, count: usize) {
        loop {
            if self.directs.lock().await.len() >= count {
                return;
            }
            self.notify.notified().await;
        }
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn broadcast(&self, room: &str, text: &str) -> Result<(), PlauditError> {
        self.broadcasts
            .lock()
            .await
            .push((room.to_string(), text.to_string()));
        self.notify.notify_one();
        Ok(())
    }

    async fn direct(&self, user: &UserId, text: &str) -> Result<(), PlauditError> {
        self.directs
            .lock()
            .await
            .push((user.clone(), text.to_string()));
        self.notify.notify_one();
        Ok(())
    }

    async fn mirror_failed(&self, failure: MirrorFailure) -> Result<(), PlauditError> {
        self.failures.lock().await.push(failure);
        self.notify.notify_one();
        Ok(())
    }
}
