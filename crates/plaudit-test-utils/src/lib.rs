// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock implementations of the Plaudit collaborator traits.
//!
//! `MemoryPreferenceStore`, `MockDispatcher`, and `MockConnector` implement
//! the `plaudit-core` traits with injectable outcomes and captured calls,
//! so engine tests run deterministically with no external systems.

pub mod mock_connector;
pub mod mock_dispatcher;
pub mod mock_store;

pub use mock_connector::MockConnector;
pub use mock_dispatcher::MockDispatcher;
pub use mock_store::MemoryPreferenceStore;
