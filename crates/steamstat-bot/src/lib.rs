//! # SteamStat Bot
//!
//! Discord bot that summarizes a Steam user's library, playtime and store value.
//!
//! This is the main binary crate: it loads configuration, sets up logging,
//! builds the shared Steam client and cache, and runs the Poise framework.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;

pub use bot::*;
pub use error::*;
