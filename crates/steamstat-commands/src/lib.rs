//! # SteamStat Commands
//!
//! Discord command implementations using Poise framework for SteamStat Bot.
//!
//! This crate provides the `start` and `lookup` commands, the transport
//! independent lookup flow behind `lookup`, and report rendering.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod framework;
pub mod handler;
pub mod lookup;
pub mod messages;
pub mod report;
pub mod start;
pub mod target;

pub use framework::*;
pub use handler::{lookup as run_lookup, respond, LookupError};
pub use report::*;
pub use target::*;
