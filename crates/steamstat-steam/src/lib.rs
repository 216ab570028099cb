//! # SteamStat Steam
//!
//! Cached client for the Steam Web API and the Steam store API.
//!
//! This crate owns every upstream call the bot makes: vanity name
//! resolution, player summaries, owned games and store prices. Results are
//! kept in an injectable expiring cache, and price lookups for a whole
//! library are fanned out with a bounded concurrency cap.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod client;
pub mod http;
pub mod models;
pub mod price;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use cache::*;
pub use client::*;
pub use http::*;
pub use models::*;
pub use price::*;
