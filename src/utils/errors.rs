//! Error handling for storebot
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the storebot application
#[derive(Error, Debug)]
pub enum StoreBotError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied for user {user_id}")]
    PermissionDenied { user_id: i64 },
}

/// Result type alias for storebot operations
pub type Result<T> = std::result::Result<T, StoreBotError>;

impl StoreBotError {
    /// Whether the failing operation may be retried by the user as-is.
    /// Database failures leave session state untouched, so a retry of
    /// the same step can succeed once the store recovers.
    pub fn is_recoverable(&self) -> bool {
        match self {
            StoreBotError::Database(_) => true,
            StoreBotError::Migration(_) => false,
            StoreBotError::Telegram(_) => true,
            StoreBotError::Config(_) => false,
            StoreBotError::PermissionDenied { .. } => false,
        }
    }
}
