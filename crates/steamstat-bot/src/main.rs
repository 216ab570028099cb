//! Main entry point for SteamStat Bot.

use anyhow::Context as _;
use steamstat_bot::SteamStatBot;
use steamstat_common::init_logging;
use steamstat_config::ConfigLoader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = ConfigLoader::locate();
    let config = ConfigLoader::load_from(config_path.as_deref())
        .context("Failed to load configuration")?;

    // Held for the process lifetime so buffered file logs are flushed
    let _log_guard = init_logging(&config.logging).context("Failed to initialize logging")?;

    info!("Starting SteamStat Bot v{}", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => info!("No configuration file found, using defaults and environment"),
    }
    info!(
        ttl_seconds = config.cache.ttl_seconds,
        max_capacity = config.cache.max_capacity,
        price_concurrency = config.steam.price_concurrency,
        "Configuration loaded"
    );

    let bot = SteamStatBot::new(config).context("Failed to create bot")?;

    if let Err(e) = bot.start().await {
        error!("Bot stopped with error: {}", e);
        return Err(e).context("Discord client failed");
    }

    Ok(())
}
