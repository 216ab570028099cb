//! Lookup command summarizing a Steam library.

use crate::framework::{Context, Error};
use crate::handler;
use tracing::info;

/// Shows playtime and library value for a Steam account.
#[poise::command(slash_command, prefix_command)]
pub async fn lookup(
    ctx: Context<'_>,
    #[description = "Steam ID, profile name or profile URL"] account: Option<String>,
) -> Result<(), Error> {
    info!(
        "Lookup command executed by user {} for {:?}",
        ctx.author().id,
        account
    );

    // Library-wide price lookups can outlast the interaction deadline
    ctx.defer().await?;

    let data = ctx.data();
    let reply = handler::respond(
        &data.steam,
        account.as_deref(),
        &data.config.steam.default_currency_label,
    )
    .await;

    ctx.say(reply).await?;
    Ok(())
}
