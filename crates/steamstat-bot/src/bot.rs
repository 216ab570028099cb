//! Core bot logic using the Poise framework.

use crate::error::BotResult;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use steamstat_commands::{create_framework, Data};
use steamstat_config::Config;
use steamstat_steam::{SteamCache, SteamClient};
use tracing::info;

/// Main bot structure.
pub struct SteamStatBot {
    config: Arc<Config>,
    steam: Arc<SteamClient>,
}

impl SteamStatBot {
    /// Creates a bot with a Steam client and cache built from `config`.
    pub fn new(config: Config) -> BotResult<Self> {
        let cache = Arc::new(SteamCache::from_config(&config.cache));
        let steam = SteamClient::from_config(&config.steam, cache)?;
        Ok(Self::with_steam_client(config, Arc::new(steam)))
    }

    /// Creates a bot around an existing Steam client.
    pub fn with_steam_client(config: Config, steam: Arc<SteamClient>) -> Self {
        Self {
            config: Arc::new(config),
            steam,
        }
    }

    /// Gateway intents the bot connects with.
    pub fn intents() -> serenity::GatewayIntents {
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT
    }

    /// Starts the bot.
    pub async fn start(&self) -> BotResult<()> {
        let config = Arc::clone(&self.config);
        let steam = Arc::clone(&self.steam);

        let framework = create_framework(&self.config.discord.command_prefix)
            .setup(move |ctx, ready, framework| {
                Box::pin(async move {
                    info!("Connected to Discord as {}", ready.user.name);
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                    info!(
                        "Registered {} commands globally",
                        framework.options().commands.len()
                    );
                    Ok(Data { config, steam })
                })
            })
            .build();

        let mut client = serenity::ClientBuilder::new(&self.config.discord.token, Self::intents())
            .framework(framework)
            .await?;

        info!("Starting Discord client");
        client.start().await?;
        Ok(())
    }
}
