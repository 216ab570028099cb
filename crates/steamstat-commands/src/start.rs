//! Start command replying with the greeting.

use crate::framework::{Context, Error};
use crate::messages::GREETING;
use tracing::info;

/// Explains how to use the bot.
#[poise::command(slash_command, prefix_command)]
pub async fn start(ctx: Context<'_>) -> Result<(), Error> {
    info!("Start command executed by user {}", ctx.author().id);
    ctx.say(GREETING).await?;
    Ok(())
}
