//! Server configuration, read once at startup from the environment.
//!
//! A `.env` file in the working directory is loaded first if present.

use std::{env, time::Duration};

use log::LevelFilter;

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind_address: String,
    /// Public URL of the dashboard, used to build OAuth redirect URIs.
    pub base_url: String,
    pub database_path: String,
    pub template_dir: String,
    pub static_dir: String,
    pub log_level: LevelFilter,
    /// How long a login session stays valid.
    pub session_ttl: Duration,
    /// Adds the `Secure` flag to every cookie we set.
    pub cookie_secure: bool,

    pub discord: OAuthClient,
    pub spotify: OAuthClient,
    pub lastfm: LastfmClient,
}

#[derive(Debug, Clone)]
pub struct OAuthClient {
    pub client_id: String,
    pub client_secret: String,
    /// Where the user is sent to approve us.
    pub authorize_url: String,
    pub token_url: String,
    /// Profile of the user the access token belongs to.
    pub profile_url: String,
}

impl OAuthClient {
    pub fn discord(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
            authorize_url: "https://discord.com/oauth2/authorize".to_string(),
            token_url: "https://discord.com/api/oauth2/token".to_string(),
            profile_url: "https://discord.com/api/users/@me".to_string(),
        }
    }

    pub fn spotify(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
            authorize_url: "https://accounts.spotify.com/authorize".to_string(),
            token_url: "https://accounts.spotify.com/api/token".to_string(),
            profile_url: "https://api.spotify.com/v1/me".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LastfmClient {
    pub api_key: String,
    pub shared_secret: String,
    pub auth_url: String,
    pub api_url: String,
}

impl LastfmClient {
    pub fn new(api_key: String, shared_secret: String) -> Self {
        Self {
            api_key,
            shared_secret,
            auth_url: "https://www.last.fm/api/auth/".to_string(),
            api_url: "https://ws.audioscrobbler.com/2.0/".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let log_level = optional("LOG_LEVEL", "info");
        let log_level: LevelFilter = log_level
            .parse()
            .map_err(|_| ConfigError::Invalid("LOG_LEVEL", log_level))?;

        let session_ttl = parse_session_ttl(optional("SESSION_TTL", "30days"))?;

        Ok(Self {
            bind_address: optional("BIND_ADDRESS", "127.0.0.1:7878"),
            base_url: optional("BASE_URL", "http://localhost:7878")
                .trim_end_matches('/')
                .to_string(),
            database_path: optional("DATABASE_PATH", "./db.sqlite3"),
            template_dir: optional("TEMPLATE_DIR", "templates"),
            static_dir: optional("STATIC_DIR", "public"),
            log_level,
            session_ttl,
            cookie_secure: parse_bool("COOKIE_SECURE", &optional("COOKIE_SECURE", "false"))?,
            discord: OAuthClient::discord(
                required("DISCORD_CLIENT_ID")?,
                required("DISCORD_CLIENT_SECRET")?,
            ),
            spotify: OAuthClient::spotify(
                required("SPOTIFY_CLIENT_ID")?,
                required("SPOTIFY_CLIENT_SECRET")?,
            ),
            lastfm: LastfmClient::new(
                required("LASTFM_API_KEY")?,
                required("LASTFM_SHARED_SECRET")?,
            ),
        })
    }

    /// Config for tests: in-memory database, templates from the crate root.
    pub fn test_default() -> Self {
        Self {
            bind_address: "127.0.0.1:0".to_string(),
            base_url: "http://localhost:7878".to_string(),
            database_path: ":memory:".to_string(),
            template_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/templates").to_string(),
            static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/public").to_string(),
            log_level: LevelFilter::Debug,
            session_ttl: Duration::from_secs(30 * 24 * 60 * 60),
            cookie_secure: false,
            discord: OAuthClient::discord(
                "discord_client".to_string(),
                "discord_secret".to_string(),
            ),
            spotify: OAuthClient::spotify(
                "spotify_client".to_string(),
                "spotify_secret".to_string(),
            ),
            lastfm: LastfmClient::new("lastfm_key".to_string(), "lastfm_secret".to_string()),
        }
    }

    /// Absolute URL for a path on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .map(|value| value.trim().to_string())
        .map_err(|_| ConfigError::Missing(key))
}

fn optional(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Session lifetimes are compared against unix timestamps, so they must fit an `i64`.
fn parse_session_ttl(value: String) -> Result<Duration, ConfigError> {
    match humantime::parse_duration(&value) {
        Ok(ttl) if i64::try_from(ttl.as_secs()).is_ok() => Ok(ttl),
        _ => Err(ConfigError::Invalid("SESSION_TTL", value)),
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid(key, value.to_string())),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
