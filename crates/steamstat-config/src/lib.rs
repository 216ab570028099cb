//! # SteamStat Config
//!
//! Type-safe configuration management for SteamStat Bot.
//!
//! This crate provides configuration loading from YAML or TOML files,
//! environment variable overrides, defaults and validation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::*;
pub use schema::*;
pub use validator::*;
