//! Steam Web API and store API client with result caching.
//!
//! Each fetcher consults the injected [`SteamCache`] first and performs at
//! most one upstream call on a miss. Only present results are cached: an
//! unknown player, an empty or hidden library and an unknown price are
//! looked up again on the next request. Vanity resolution is never cached.

use crate::cache::{CacheKey, CachedValue, SteamCache};
use crate::http::{HttpFetch, ReqwestFetcher};
use crate::models::{ApiEnvelope, AppData, OwnedGame, OwnedGames, PlayerSummaries, PlayerSummary,
    ResolveVanityResponse};
use crate::price::PriceQuote;
use futures::stream::{self, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use steamstat_common::{AppId, Result, SteamId};
use steamstat_config::SteamConfig;
use tracing::{debug, info, instrument, warn};

/// Path of the vanity name resolution endpoint.
pub const RESOLVE_VANITY_PATH: &str = "/ISteamUser/ResolveVanityURL/v1/";
/// Path of the player summaries endpoint.
pub const PLAYER_SUMMARIES_PATH: &str = "/ISteamUser/GetPlayerSummaries/v2/";
/// Path of the owned games endpoint.
pub const OWNED_GAMES_PATH: &str = "/IPlayerService/GetOwnedGames/v1/";
/// Path of the store app details endpoint.
pub const APP_DETAILS_PATH: &str = "/api/appdetails";

/// Default number of concurrent price lookups.
pub const DEFAULT_PRICE_CONCURRENCY: usize = 8;

/// Base URLs of the two upstream hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteamEndpoints {
    api_base: String,
    store_base: String,
}

impl SteamEndpoints {
    /// Creates endpoints from the Web API and store base URLs.
    pub fn new(api_base: impl Into<String>, store_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            store_base: store_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn api(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn store(&self, path: &str) -> String {
        format!("{}{}", self.store_base, path)
    }
}

impl Default for SteamEndpoints {
    fn default() -> Self {
        let defaults = SteamConfig::default();
        Self::new(defaults.api_base_url, defaults.store_base_url)
    }
}

/// Cached client for every upstream lookup the bot performs.
pub struct SteamClient {
    fetcher: Arc<dyn HttpFetch>,
    cache: Arc<SteamCache>,
    endpoints: SteamEndpoints,
    api_key: String,
    country_code: Option<String>,
    price_concurrency: usize,
}

impl SteamClient {
    /// Creates a client over an arbitrary fetcher and cache.
    pub fn new(
        fetcher: Arc<dyn HttpFetch>,
        cache: Arc<SteamCache>,
        endpoints: SteamEndpoints,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            cache,
            endpoints,
            api_key: api_key.into(),
            country_code: None,
            price_concurrency: DEFAULT_PRICE_CONCURRENCY,
        }
    }

    /// Creates a client backed by a shared `reqwest` client.
    pub fn from_config(config: &SteamConfig, cache: Arc<SteamCache>) -> Result<Self> {
        let fetcher = ReqwestFetcher::new(config.request_timeout())?;
        let endpoints = SteamEndpoints::new(&config.api_base_url, &config.store_base_url);

        Ok(Self::new(Arc::new(fetcher), cache, endpoints, &config.api_key)
            .with_price_concurrency(config.price_concurrency)
            .with_country_code(config.country_code.clone()))
    }

    /// Sets the cap on concurrent price lookups (minimum 1).
    #[must_use]
    pub fn with_price_concurrency(mut self, concurrency: usize) -> Self {
        self.price_concurrency = concurrency.max(1);
        self
    }

    /// Sets the store country used for price lookups.
    #[must_use]
    pub fn with_country_code(mut self, country_code: Option<String>) -> Self {
        self.country_code = country_code;
        self
    }

    /// Resolves a vanity name to a Steam ID with one upstream call.
    ///
    /// `Ok(None)` when Steam reports no match or the call returned a
    /// non-success status.
    #[instrument(skip(self))]
    pub async fn resolve_vanity(&self, vanity: &str) -> Result<Option<SteamId>> {
        let query = [
            ("key", self.api_key.clone()),
            ("vanityurl", vanity.to_string()),
        ];
        let Some(body) = self
            .fetcher
            .get_json(&self.endpoints.api(RESOLVE_VANITY_PATH), &query)
            .await?
        else {
            return Ok(None);
        };

        let resolved = decode::<ApiEnvelope<ResolveVanityResponse>>(body)?;
        let steam_id = resolved.response.steam_id();
        match steam_id {
            Some(id) => info!(%id, "Resolved vanity name"),
            None => debug!(
                message = resolved.response.message.as_deref().unwrap_or(""),
                "Vanity name did not resolve"
            ),
        }
        Ok(steam_id)
    }

    /// Fetches the public profile of a player.
    #[instrument(skip(self), fields(steam_id = %steam_id))]
    pub async fn get_profile(&self, steam_id: SteamId) -> Result<Option<Arc<PlayerSummary>>> {
        let key = CacheKey::Profile(steam_id);
        if let Some(CachedValue::Profile(profile)) = self.cache.get(&key).await {
            return Ok(Some(profile));
        }

        let query = [
            ("key", self.api_key.clone()),
            ("steamids", steam_id.to_string()),
        ];
        let Some(body) = self
            .fetcher
            .get_json(&self.endpoints.api(PLAYER_SUMMARIES_PATH), &query)
            .await?
        else {
            return Ok(None);
        };

        let summaries = decode::<ApiEnvelope<PlayerSummaries>>(body)?;
        let Some(player) = summaries.response.players.into_iter().next() else {
            debug!("No player matched");
            return Ok(None);
        };

        let profile = Arc::new(player);
        self.cache
            .insert(key, CachedValue::Profile(Arc::clone(&profile)))
            .await;
        Ok(Some(profile))
    }

    /// Fetches the owned games of a player, including free games.
    ///
    /// `Ok(None)` when the library is hidden or empty.
    #[instrument(skip(self), fields(steam_id = %steam_id))]
    pub async fn get_library(&self, steam_id: SteamId) -> Result<Option<Arc<Vec<OwnedGame>>>> {
        let key = CacheKey::Library(steam_id);
        if let Some(CachedValue::Library(games)) = self.cache.get(&key).await {
            return Ok(Some(games));
        }

        let query = [
            ("key", self.api_key.clone()),
            ("steamid", steam_id.to_string()),
            ("include_appinfo", "1".to_string()),
            ("include_played_free_games", "1".to_string()),
        ];
        let Some(body) = self
            .fetcher
            .get_json(&self.endpoints.api(OWNED_GAMES_PATH), &query)
            .await?
        else {
            return Ok(None);
        };

        let owned = decode::<ApiEnvelope<OwnedGames>>(body)?;
        let games = match owned.response.games {
            Some(games) if !games.is_empty() => Arc::new(games),
            _ => {
                debug!("Library is hidden or empty");
                return Ok(None);
            }
        };

        debug!("Fetched {} owned games", games.len());
        self.cache
            .insert(key, CachedValue::Library(Arc::clone(&games)))
            .await;
        Ok(Some(games))
    }

    /// Fetches the current store price of one title.
    ///
    /// Unknown prices are returned but not cached.
    #[instrument(skip(self), fields(app_id = %app_id))]
    pub async fn get_price(&self, app_id: AppId) -> Result<PriceQuote> {
        let key = CacheKey::Price(app_id);
        if let Some(CachedValue::Price(quote)) = self.cache.get(&key).await {
            return Ok(quote);
        }

        let mut query = vec![("appids", app_id.to_string())];
        if let Some(cc) = &self.country_code {
            query.push(("cc", cc.clone()));
        }
        let Some(body) = self
            .fetcher
            .get_json(&self.endpoints.store(APP_DETAILS_PATH), &query)
            .await?
        else {
            return Ok(PriceQuote::Unknown);
        };

        let quote = app_data_from(&body, app_id)
            .map_or(PriceQuote::Unknown, |data| PriceQuote::from_app_data(&data));

        if quote.is_known() {
            self.cache.insert(key, CachedValue::Price(quote.clone())).await;
        }
        Ok(quote)
    }

    /// Fetches prices for many titles with bounded concurrency.
    ///
    /// Results are returned in the order of `app_ids` regardless of which
    /// lookup finishes first. A failed lookup yields [`PriceQuote::Unknown`].
    #[instrument(skip(self, app_ids), fields(count = app_ids.len()))]
    pub async fn get_prices(&self, app_ids: &[AppId]) -> Vec<(AppId, PriceQuote)> {
        stream::iter(app_ids.iter().copied())
            .map(|app_id| async move {
                let quote = match self.get_price(app_id).await {
                    Ok(quote) => quote,
                    Err(e) => {
                        warn!(%app_id, error = %e, "Price lookup failed, treating as unknown");
                        PriceQuote::Unknown
                    }
                };
                (app_id, quote)
            })
            .buffered(self.price_concurrency)
            .collect()
            .await
    }
}

impl fmt::Debug for SteamClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SteamClient")
            .field("endpoints", &self.endpoints)
            .field("api_key", &"<redacted>")
            .field("country_code", &self.country_code)
            .field("price_concurrency", &self.price_concurrency)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T> {
    Ok(serde_json::from_value(body)?)
}

/// Pulls the `data` object for `app_id` out of an `appdetails` body.
fn app_data_from(body: &Value, app_id: AppId) -> Option<AppData> {
    let entry = body.get(app_id.to_string())?;
    if !entry.get("success").and_then(Value::as_bool).unwrap_or(false) {
        return None;
    }
    serde_json::from_value(entry.get("data")?.clone()).ok()
}
