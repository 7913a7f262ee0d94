//! Clients for the external identity providers.
//!
//! Discord and Spotify use the OAuth2 authorization-code flow; Last.fm has
//! its own token flow with signed API calls.

pub mod discord;
pub mod lastfm;
pub mod spotify;

use log::error;
use serde::{de::DeserializeOwned, Deserialize};

use crate::error::{AppError, Result};

/// OAuth2 token endpoint response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Seconds until `access_token` expires.
    pub expires_in: i64,
    /// Space separated.
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenResponse {
    pub fn expires_at(&self, now: i64) -> i64 {
        now.saturating_add(self.expires_in)
    }

    pub fn scopes(&self) -> Vec<String> {
        self.scope
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

/// Build `base?key=value&...` with every value percent-encoded.
pub fn url_with_query(base: &str, params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", base, query)
}

/// Parse a JSON response, turning non-2xx statuses into [`AppError::Provider`].
async fn check_response_json<T: DeserializeOwned>(
    provider: &str,
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("{} request failed with {}: {}", provider, status, body);
        return Err(AppError::Provider(format!(
            "{} responded with status {}",
            provider, status
        )));
    }

    Ok(response.json().await?)
}
