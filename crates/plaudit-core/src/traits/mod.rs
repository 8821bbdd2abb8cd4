// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the three external collaborators.
//!
//! All traits use `#[async_trait]` for dynamic dispatch compatibility; the
//! engine holds collaborators as `Arc<dyn Trait + Send + Sync>`.

pub mod connector;
pub mod dispatch;
pub mod store;

// Re-export all traits at the traits module level for convenience.
pub use connector::Connector;
pub use dispatch::RewardDispatcher;
pub use store::PreferenceStore;
