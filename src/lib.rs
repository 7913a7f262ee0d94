//! Web dashboard for the Blanco music bot.
//!
//! Users sign in with Discord, then link or unlink their Spotify and
//! Last.fm accounts, log out, or delete their account.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logger;
pub mod model;
pub mod providers;
pub mod routes;
pub mod templates;

pub use model::AppState;
