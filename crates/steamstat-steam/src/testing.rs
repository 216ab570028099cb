//! Scripted upstream for tests.
//!
//! [`FakeUpstream`] implements [`HttpFetch`] by matching the request URL
//! suffix (and optionally one query parameter) against registered replies,
//! and records every call so tests can assert on upstream traffic.

#![allow(missing_docs)]

use crate::http::HttpFetch;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use steamstat_common::{Result, SteamStatError};

/// Scripted answer for a matched request.
#[derive(Debug, Clone)]
pub enum FakeReply {
    /// 2xx with this JSON body
    Json(Value),
    /// Non-success HTTP status
    Status(u16),
    /// Connection level failure
    TransportError(String),
}

/// One request seen by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl RecordedCall {
    /// Value of a query parameter, if it was sent.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
struct Route {
    path: String,
    query: Option<(String, String)>,
    delay: Option<Duration>,
    reply: FakeReply,
}

impl Route {
    fn matches(&self, url: &str, query: &[(&str, String)]) -> bool {
        if !url.ends_with(&self.path) {
            return false;
        }
        match &self.query {
            Some((key, value)) => query.iter().any(|(k, v)| k == key && v == value),
            None => true,
        }
    }
}

/// In-memory [`HttpFetch`] with call recording.
///
/// Query-specific routes win over path-only routes; among equals the most
/// recently registered wins. Unmatched requests answer `Ok(None)`.
#[derive(Debug, Default)]
pub struct FakeUpstream {
    routes: Mutex<Vec<Route>>,
    calls: Mutex<Vec<RecordedCall>>,
    default_delay: Mutex<Option<Duration>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl FakeUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every request whose URL ends with `path`.
    pub fn on(&self, path: &str, reply: FakeReply) {
        self.push(path, None, None, reply);
    }

    /// Answers requests to `path` carrying `key=value`.
    pub fn on_query(&self, path: &str, key: &str, value: &str, reply: FakeReply) {
        self.push(path, Some((key, value)), None, reply);
    }

    /// Like [`FakeUpstream::on_query`], answering after `delay`.
    pub fn on_query_delayed(
        &self,
        path: &str,
        key: &str,
        value: &str,
        delay: Duration,
        reply: FakeReply,
    ) {
        self.push(path, Some((key, value)), Some(delay), reply);
    }

    /// Delay applied to requests whose route sets none, unmatched included.
    pub fn set_default_delay(&self, delay: Duration) {
        *lock(&self.default_delay) = Some(delay);
    }

    fn push(&self, path: &str, query: Option<(&str, &str)>, delay: Option<Duration>, reply: FakeReply) {
        lock(&self.routes).push(Route {
            path: path.to_string(),
            query: query.map(|(k, v)| (k.to_string(), v.to_string())),
            delay,
            reply,
        });
    }

    fn route_for(&self, url: &str, query: &[(&str, String)]) -> Option<Route> {
        let routes = lock(&self.routes);
        let matching: Vec<&Route> = routes
            .iter()
            .rev()
            .filter(|r| r.matches(url, query))
            .collect();
        matching
            .iter()
            .find(|r| r.query.is_some())
            .or_else(|| matching.first())
            .map(|r| (*r).clone())
    }

    /// Every recorded call, in arrival order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Number of calls whose URL ends with `path`.
    pub fn calls_to(&self, path: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| c.url.ends_with(path))
            .count()
    }

    /// Number of calls to `path` carrying `key=value`.
    pub fn calls_with(&self, path: &str, key: &str, value: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| c.url.ends_with(path) && c.param(key) == Some(value))
            .count()
    }

    pub fn total_calls(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn reset_calls(&self) {
        lock(&self.calls).clear();
    }

    /// Highest number of requests observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpFetch for FakeUpstream {
    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Option<Value>> {
        lock(&self.calls).push(RecordedCall {
            url: url.to_string(),
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
        });

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.in_flight);
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let route = self.route_for(url, query);
        let delay = route
            .as_ref()
            .and_then(|r| r.delay)
            .or_else(|| *lock(&self.default_delay));
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match route.map(|r| r.reply) {
            Some(FakeReply::Json(body)) => Ok(Some(body)),
            Some(FakeReply::Status(_)) | None => Ok(None),
            Some(FakeReply::TransportError(message)) => Err(SteamStatError::network(message)),
        }
    }
}

/// Upstream JSON bodies shaped like the real services.
pub mod fixtures {
    use serde_json::{json, Value};
    use steamstat_common::SteamId;

    pub fn resolve_vanity_match(steam_id: SteamId) -> Value {
        json!({"response": {"steamid": steam_id.to_string(), "success": 1}})
    }

    pub fn resolve_vanity_no_match() -> Value {
        json!({"response": {"success": 42, "message": "No match"}})
    }

    pub fn player_summaries(steam_id: SteamId, persona_name: &str) -> Value {
        json!({
            "response": {
                "players": [{
                    "steamid": steam_id.to_string(),
                    "communityvisibilitystate": 3,
                    "personaname": persona_name,
                    "profileurl": format!("https://steamcommunity.com/profiles/{steam_id}/"),
                    "avatarfull": "https://avatars.steamstatic.com/full.jpg"
                }]
            }
        })
    }

    pub fn player_summaries_empty() -> Value {
        json!({"response": {"players": []}})
    }

    /// Library body from `(appid, name, playtime_forever)` rows.
    pub fn owned_games(games: &[(u32, &str, Option<u64>)]) -> Value {
        let games: Vec<Value> = games
            .iter()
            .map(|(appid, name, playtime)| match playtime {
                Some(minutes) => json!({"appid": appid, "name": name, "playtime_forever": minutes}),
                None => json!({"appid": appid, "name": name}),
            })
            .collect();
        json!({"response": {"game_count": games.len(), "games": games}})
    }

    pub fn app_details_priced(appid: u32, formatted: &str, currency: &str) -> Value {
        json!({
            appid.to_string(): {
                "success": true,
                "data": {
                    "type": "game",
                    "name": format!("App {appid}"),
                    "is_free": false,
                    "price_overview": {
                        "currency": currency,
                        "initial": 0,
                        "final": 0,
                        "discount_percent": 0,
                        "initial_formatted": "",
                        "final_formatted": formatted
                    }
                }
            }
        })
    }

    pub fn app_details_free(appid: u32, name: &str) -> Value {
        json!({
            appid.to_string(): {
                "success": true,
                "data": {"type": "game", "name": name, "is_free": true}
            }
        })
    }

    pub fn app_details_failure(appid: u32) -> Value {
        json!({appid.to_string(): {"success": false}})
    }
}
