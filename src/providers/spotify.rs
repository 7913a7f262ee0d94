use log::info;
use serde::Deserialize;

use crate::{
    auth::token::unix_now,
    config::Config,
    error::Result,
    model::{Credentials, UserId},
};

use super::{check_response_json, url_with_query, TokenResponse};

/// Enough to read the user's library and playlists.
pub const SCOPES: &str =
    "user-read-private user-library-read playlist-read-private playlist-read-collaborative";
pub const CALLBACK_PATH: &str = "/spotifyoauth";

#[derive(Debug, Deserialize)]
struct SpotifyProfile {
    id: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl SpotifyProfile {
    fn display_name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.id,
        }
    }
}

pub fn authorize_url(config: &Config, state: &str) -> String {
    url_with_query(
        &config.spotify.authorize_url,
        &[
            ("client_id", config.spotify.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.url(CALLBACK_PATH).as_str()),
            ("scope", SCOPES),
            ("state", state),
        ],
    )
}

/// Trade an authorization code for tokens, tied to the signed-in Discord user.
pub async fn exchange_code(
    http: &reqwest::Client,
    config: &Config,
    user_id: UserId,
    code: &str,
) -> Result<Credentials> {
    let redirect_uri = config.url(CALLBACK_PATH);
    let response = http
        .post(&config.spotify.token_url)
        .basic_auth(&config.spotify.client_id, Some(&config.spotify.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?;
    let token: TokenResponse = check_response_json("Spotify", response).await?;

    let response = http
        .get(&config.spotify.profile_url)
        .bearer_auth(&token.access_token)
        .send()
        .await?;
    let profile: SpotifyProfile = check_response_json("Spotify", response).await?;

    info!("User {} linked Spotify account {}", user_id, profile.id);

    Ok(Credentials {
        user_id,
        username: profile.display_name().to_string(),
        access_token: token.access_token.clone(),
        refresh_token: token.refresh_token.clone().unwrap_or_default(),
        expires_at: token.expires_at(unix_now()),
        scopes: token.scopes(),
    })
}
