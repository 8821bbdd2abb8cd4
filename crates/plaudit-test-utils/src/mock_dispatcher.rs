// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock reward dispatcher with scripted receipts and captured requests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use plaudit_core::traits::dispatch::RewardDispatcher;
use plaudit_core::types::{BonusReceipt, BonusRequest};
use plaudit_core::PlauditError;

/// A `RewardDispatcher` that records every request and replays scripted
/// receipts.
///
/// With no scripted receipt queued, `send` fabricates a successful
/// `Issued` receipt from the request amount.
#[derive(Default)]
pub struct MockDispatcher {
    requests: Arc<Mutex<Vec<BonusRequest>>>,
    scripted: Arc<Mutex<VecDeque<Result<BonusReceipt, PlauditError>>>>,
}

impl MockDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an outcome for the next `send` call.
    pub async fn push_result(&self, result: Result<BonusReceipt, PlauditError>) {
        self.scripted.lock().await.push_back(result);
    }

    /// Queue a structured rejection for the next `send` call.
    pub async fn reject_next(&self, message: &str) {
        self.push_result(Ok(BonusReceipt::Rejected {
            message: message.to_string(),
        }))
        .await;
    }

    /// All requests seen so far, in order.
    pub async fn requests(&self) -> Vec<BonusRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of `send` calls so far.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl RewardDispatcher for MockDispatcher {
    async fn send(&self, request: &BonusRequest) -> Result<BonusReceipt, PlauditError> {
        self.requests.lock().await.push(request.clone());

        if let Some(result) = self.scripted.lock().await.pop_front() {
            return result;
        }
        Ok(BonusReceipt::Issued {
            amount_display: format!("{} points", request.amount),
            balance_display: "20 points".to_string(),
        })
    }
}
