//! Application-wide error types using thiserror.

use poise::serenity_prelude as serenity;
use steamstat_common::SteamStatError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration or client construction error.
    #[error("Configuration error: {0}")]
    Config(#[from] SteamStatError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
