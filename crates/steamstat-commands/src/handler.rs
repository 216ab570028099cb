//! The `lookup` flow, independent of the chat transport.

use crate::messages;
use crate::report::Report;
use crate::target::LookupTarget;
use steamstat_common::{AppId, SteamStatError};
use steamstat_steam::SteamClient;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

/// Ways a lookup ends without a report.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Missing or malformed argument
    #[error("invalid lookup argument")]
    Usage,

    /// Vanity name has no matching Steam ID
    #[error("vanity name {0:?} did not resolve")]
    ResolutionFailed(String),

    /// Profile or library came back empty
    #[error("profile or library unavailable")]
    DataUnavailable,

    /// Steam could not be reached or answered garbage
    #[error("upstream failure: {0}")]
    Upstream(#[from] SteamStatError),
}

impl LookupError {
    /// Reply text shown to the user.
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Usage => messages::USAGE,
            Self::ResolutionFailed(_) => messages::RESOLUTION_FAILED,
            Self::DataUnavailable => messages::DATA_UNAVAILABLE,
            Self::Upstream(_) => messages::UPSTREAM_UNAVAILABLE,
        }
    }
}

/// Runs one lookup and builds the report.
///
/// Makes no upstream call when the argument is unusable, and calls the
/// vanity resolver only for non-numeric input.
#[instrument(skip(steam, default_currency_label))]
pub async fn lookup(
    steam: &SteamClient,
    argument: Option<&str>,
    default_currency_label: &str,
) -> Result<Report, LookupError> {
    let target = argument
        .and_then(LookupTarget::parse)
        .ok_or(LookupError::Usage)?;

    let steam_id = match target {
        LookupTarget::SteamId(id) => id,
        LookupTarget::Vanity(vanity) => match steam.resolve_vanity(&vanity).await? {
            Some(id) => id,
            None => return Err(LookupError::ResolutionFailed(vanity)),
        },
    };

    let profile = steam
        .get_profile(steam_id)
        .await?
        .ok_or(LookupError::DataUnavailable)?;
    let games = steam
        .get_library(steam_id)
        .await?
        .ok_or(LookupError::DataUnavailable)?;

    let app_ids: Vec<AppId> = games.iter().map(|g| g.appid).collect();
    let prices = steam.get_prices(&app_ids).await;

    let report = Report::build(&profile, &games, &prices, default_currency_label);
    info!(
        %steam_id,
        games = report.total_games,
        unknown_prices = report.unknown_prices,
        "Lookup completed"
    );
    Ok(report)
}

/// Runs one lookup and returns the reply text, report or error message.
pub async fn respond(
    steam: &SteamClient,
    argument: Option<&str>,
    default_currency_label: &str,
) -> String {
    match lookup(steam, argument, default_currency_label).await {
        Ok(report) => report.render(),
        Err(e) => {
            match &e {
                LookupError::Upstream(source) => error!("Lookup failed: {}", source),
                other => warn!("Lookup rejected: {}", other),
            }
            e.user_message().to_string()
        }
    }
}
