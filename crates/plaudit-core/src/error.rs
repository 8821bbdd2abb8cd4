// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Plaudit mirroring engine.

use thiserror::Error;

/// The primary error type used across the collaborator traits and the engine.
#[derive(Debug, Error)]
pub enum PlauditError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Preference store errors (connection, query failure, serialization).
    #[error("preference store error: {source}")]
    Store {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Chat connector errors (delivery failure, message format, rate limiting).
    #[error("connector error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Reward dispatcher transport errors (the rewards platform was unreachable,
    /// as opposed to a structured [`BonusReceipt::Rejected`] result).
    ///
    /// [`BonusReceipt::Rejected`]: crate::types::BonusReceipt::Rejected
    #[error("dispatch error: {message}")]
    Dispatch {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
