use log::info;
use serde::Deserialize;

use crate::{
    auth::token::unix_now,
    config::Config,
    error::{AppError, Result},
    model::{Credentials, UserId},
};

use super::{check_response_json, url_with_query, TokenResponse};

pub const SCOPES: &str = "identify";
pub const CALLBACK_PATH: &str = "/discordoauth";

#[derive(Debug, Deserialize)]
struct DiscordUser {
    /// Snowflake, sent as a string.
    id: String,
    username: String,
    #[serde(default)]
    global_name: Option<String>,
}

impl DiscordUser {
    fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }
}

pub fn authorize_url(config: &Config, state: &str) -> String {
    url_with_query(
        &config.discord.authorize_url,
        &[
            ("client_id", config.discord.client_id.as_str()),
            ("redirect_uri", config.url(CALLBACK_PATH).as_str()),
            ("response_type", "code"),
            ("scope", SCOPES),
            ("state", state),
            ("prompt", "none"),
        ],
    )
}

/// Trade an authorization code for tokens and look up who they belong to.
pub async fn exchange_code(
    http: &reqwest::Client,
    config: &Config,
    code: &str,
) -> Result<Credentials> {
    let redirect_uri = config.url(CALLBACK_PATH);
    let response = http
        .post(&config.discord.token_url)
        .form(&[
            ("client_id", config.discord.client_id.as_str()),
            ("client_secret", config.discord.client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?;
    let token: TokenResponse = check_response_json("Discord", response).await?;

    let response = http
        .get(&config.discord.profile_url)
        .bearer_auth(&token.access_token)
        .send()
        .await?;
    let user: DiscordUser = check_response_json("Discord", response).await?;

    let user_id: UserId = user
        .id
        .parse()
        .map_err(|_| AppError::Provider(format!("invalid Discord user id {:?}", user.id)))?;

    info!("Discord user {} ({}) signed in", user.username, user_id);

    Ok(Credentials {
        user_id,
        username: user.display_name().to_string(),
        access_token: token.access_token.clone(),
        refresh_token: token.refresh_token.clone().unwrap_or_default(),
        expires_at: token.expires_at(unix_now()),
        scopes: token.scopes(),
    })
}
