//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! so that startup fails before any connection is attempted.

use super::Settings;
use crate::utils::errors::{Result, StoreBotError};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(StoreBotError::Config("Bot token is required".to_string()));
    }

    if config.admin_ids.is_empty() {
        return Err(StoreBotError::Config(
            "At least one admin ID must be configured".to_string(),
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(StoreBotError::Config(
            "Database URL is required".to_string(),
        ));
    }

    if config.max_connections == 0 {
        return Err(StoreBotError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(StoreBotError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_need_token_and_admins() {
        let settings = Settings::default();
        assert!(validate_settings(&settings).is_err());

        let mut settings = Settings::default();
        settings.bot.token = "test_token".to_string();
        settings.bot.admin_ids = vec![1];
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut settings = Settings::default();
        settings.bot.token = "test_token".to_string();
        settings.bot.admin_ids = vec![1];
        settings.logging.level = "verbose".to_string();

        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn rejects_zero_connection_pool() {
        let mut settings = Settings::default();
        settings.bot.token = "test_token".to_string();
        settings.bot.admin_ids = vec![1];
        settings.database.max_connections = 0;

        assert!(validate_settings(&settings).is_err());
    }
}
