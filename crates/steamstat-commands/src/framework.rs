//! Poise framework setup and command registration logic.

use crate::messages;
use std::sync::Arc;
use steamstat_config::Config;
use steamstat_steam::SteamClient;
use tracing::{error, warn};

/// Application data accessible in all commands.
pub struct Data {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Cached Steam client shared by every invocation.
    pub steam: Arc<SteamClient>,
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Every command the bot registers.
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![crate::start::start(), crate::lookup::lookup()]
}

/// Creates a new Poise framework.
pub fn create_framework(prefix: &str) -> poise::FrameworkBuilder<Data, Error> {
    poise::Framework::builder().options(poise::FrameworkOptions {
        commands: commands(),
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(prefix.to_string()),
            ..Default::default()
        },
        on_error: |error| Box::pin(on_error(error)),
        ..Default::default()
    })
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::ArgumentParse {
            error, input, ctx, ..
        } => {
            warn!(
                "Invalid argument for {}: {} (input: {:?})",
                ctx.command().qualified_name,
                error,
                input
            );
            if let Err(e) = ctx.say(messages::USAGE).await {
                error!("Failed to send usage message: {}", e);
            }
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Command {} failed: {}", ctx.command().qualified_name, error);
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling framework error: {}", e);
            }
        }
    }
}
