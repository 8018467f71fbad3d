// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.

use crate::config::ConfigError;

/// Error returned by result store operations.
///
/// Remote write failures (connectivity, permission, quota, malformed input)
/// all surface as [`AppError::Firestore`] with the client error preserved.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Firestore error: {0}")]
    Firestore(#[from] firestore::errors::FirestoreError),

    #[error("Database not connected (offline mode)")]
    Offline,

    #[error("Invalid model result: {0}")]
    InvalidRecord(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, AppError>;
