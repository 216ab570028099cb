//! Steam Web API and store API response models.

use serde::{Deserialize, Serialize};
use steamstat_common::{AppId, SteamId};

// ============================================================================
// Web API Envelope
// ============================================================================

/// Every Steam Web API payload is wrapped in a `response` object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiEnvelope<T> {
    /// Response payload
    pub response: T,
}

// ============================================================================
// ResolveVanityURL
// ============================================================================

/// Payload of `ISteamUser/ResolveVanityURL`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ResolveVanityResponse {
    /// 1 on success, 42 when no match exists
    #[serde(default)]
    pub success: u8,
    /// Resolved SteamID64, present on success
    pub steamid: Option<String>,
    /// Failure description
    pub message: Option<String>,
}

impl ResolveVanityResponse {
    /// The resolved identifier, if the lookup matched.
    pub fn steam_id(&self) -> Option<SteamId> {
        if self.success != 1 {
            return None;
        }
        self.steamid.as_deref().and_then(SteamId::parse_digits)
    }
}

// ============================================================================
// GetPlayerSummaries
// ============================================================================

/// Payload of `ISteamUser/GetPlayerSummaries`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlayerSummaries {
    /// Matching players, empty when the ID is unknown
    #[serde(default)]
    pub players: Vec<PlayerSummary>,
}

/// Public profile of one Steam account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerSummary {
    /// SteamID64 as a string
    pub steamid: String,
    /// Display name
    pub personaname: String,
    /// Community profile URL
    pub profileurl: Option<String>,
    /// Full-size avatar URL
    pub avatarfull: Option<String>,
    /// 1 = private, 3 = public
    pub communityvisibilitystate: Option<u8>,
    /// Real name, if the user shares it
    pub realname: Option<String>,
    /// ISO country code, if the user shares it
    pub loccountrycode: Option<String>,
}

// ============================================================================
// GetOwnedGames
// ============================================================================

/// Payload of `IPlayerService/GetOwnedGames`.
///
/// Private profiles return an empty object, so both fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OwnedGames {
    /// Number of owned titles
    pub game_count: Option<u32>,
    /// Owned titles
    pub games: Option<Vec<OwnedGame>>,
}

/// One owned title.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OwnedGame {
    /// Store application ID
    pub appid: AppId,
    /// Title name (requires `include_appinfo`)
    pub name: Option<String>,
    /// Lifetime playtime in minutes
    pub playtime_forever: Option<u64>,
}

impl OwnedGame {
    /// Name for display, falling back to the app ID.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("App {}", self.appid))
    }
}

// ============================================================================
// Store appdetails
// ============================================================================

/// The `data` object of one store `appdetails` entry.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppData {
    /// Store name
    pub name: Option<String>,
    /// Whether the title is free to play
    #[serde(default)]
    pub is_free: bool,
    /// Current price, absent for free or unpriced titles
    pub price_overview: Option<PriceOverview>,
}

/// Store price information.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PriceOverview {
    /// ISO 4217 currency code
    pub currency: String,
    /// Price before discount, minor units
    pub initial: Option<u64>,
    /// Price after discount, minor units
    #[serde(rename = "final")]
    pub final_price: Option<u64>,
    /// Active discount
    pub discount_percent: Option<u32>,
    /// Localized display string, e.g. `"1 234 руб."`
    pub final_formatted: String,
}
