//! Last.fm web authentication.
//!
//! The user approves us on last.fm, which redirects back with a one-time
//! token. `auth.getSession` turns that into a session key that never
//! expires. Every call is signed with [`api_signature`].

use log::{error, info};
use serde::Deserialize;

use crate::{
    config::Config,
    error::{AppError, Result},
    model::{Credentials, UserId},
};

use super::url_with_query;

pub const CALLBACK_PATH: &str = "/lastfmtoken";

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct LastfmSession {
    pub name: String,
    pub key: String,
}

#[derive(Debug, Deserialize)]
struct SessionEnvelope {
    session: LastfmSession,
}

pub fn auth_url(config: &Config) -> String {
    url_with_query(
        &config.lastfm.auth_url,
        &[
            ("api_key", config.lastfm.api_key.as_str()),
            ("cb", config.url(CALLBACK_PATH).as_str()),
        ],
    )
}

/// md5 over every parameter sorted by name, written as `namevalue`, followed
/// by the shared secret. `format` and `callback` are never signed.
pub fn api_signature(params: &[(&str, &str)], secret: &str) -> String {
    let mut signed: Vec<_> = params
        .iter()
        .filter(|(name, _)| *name != "format" && *name != "callback")
        .collect();
    signed.sort_by_key(|(name, _)| *name);

    let mut payload = String::new();
    for (name, value) in signed {
        payload.push_str(name);
        payload.push_str(value);
    }
    payload.push_str(secret);

    format!("{:x}", md5::compute(payload.as_bytes()))
}

/// Exchange the token from the auth callback for a session.
pub async fn get_session(
    http: &reqwest::Client,
    config: &Config,
    user_id: UserId,
    token: &str,
) -> Result<Credentials> {
    let mut params = vec![
        ("method", "auth.getSession"),
        ("api_key", config.lastfm.api_key.as_str()),
        ("token", token),
    ];
    let signature = api_signature(&params, &config.lastfm.shared_secret);
    params.push(("api_sig", signature.as_str()));
    params.push(("format", "json"));

    let response = http.post(&config.lastfm.api_url).form(&params).send().await?;
    let body: serde_json::Value = response.json().await?;
    let session = parse_session(body)?;

    info!("User {} linked Last.fm account {}", user_id, session.name);

    Ok(Credentials {
        user_id,
        username: session.name,
        access_token: session.key,
        refresh_token: String::new(),
        expires_at: 0,
        scopes: Vec::new(),
    })
}

/// Last.fm reports failures as `{"error": code, "message": ...}`, often with
/// a 200 status, so the body decides.
fn parse_session(body: serde_json::Value) -> Result<LastfmSession> {
    if let Some(code) = body.get("error") {
        let message = body
            .get("message")
            .and_then(|message| message.as_str())
            .unwrap_or("unknown error");
        error!("Last.fm auth.getSession failed ({}): {}", code, message);
        return Err(AppError::Provider(format!("Last.fm error {}: {}", code, message)));
    }

    let envelope: SessionEnvelope = serde_json::from_value(body)
        .map_err(|err| AppError::Provider(format!("unexpected Last.fm response: {}", err)))?;
    Ok(envelope.session)
}
