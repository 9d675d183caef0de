//! Storebot Telegram Bot
//!
//! A Telegram bot for running a small storefront catalog. Admins build
//! the catalog through a guided multi-step product-entry dialogue;
//! everyone can browse it through an inline button.

pub mod config;
pub mod database;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, StoreBotError};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use router::Router;
pub use services::AuthService;
pub use state::SessionStore;
