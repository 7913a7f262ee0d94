//! Stand-ins for the Discord, Spotify and Last.fm endpoints the callbacks call.
#![allow(dead_code)]

use std::{collections::HashMap, net::TcpListener, sync::Arc};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Form, Json, Router,
};
use blanco_dashboard::{config::Config, model::UserId, providers::lastfm, AppState};
use serde_json::{json, Value};

/// Discord id the stub signs everyone in as.
pub const DISCORD_ID: UserId = 80351110224678912;

/// The only authorization code (or Last.fm token) the stub accepts.
pub const GOOD_CODE: &str = "good-code";

/// Accepted too, but deletes [`RACING_USER`]'s account before answering.
pub const DELETING_CODE: &str = "delete-during-exchange";
pub const RACING_USER: UserId = 1;

type Params = Form<HashMap<String, String>>;

pub fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind provider stub");
    let base = format!("http://{}", listener.local_addr().unwrap());
    (listener, base)
}

pub fn point_at(config: &mut Config, base: &str) {
    config.discord.token_url = format!("{base}/discord/oauth2/token");
    config.discord.profile_url = format!("{base}/discord/users/@me");
    config.spotify.token_url = format!("{base}/spotify/api/token");
    config.spotify.profile_url = format!("{base}/spotify/v1/me");
    config.lastfm.api_url = format!("{base}/lastfm/2.0/");
}

/// Serve the stub in the background. `app` is the dashboard's own state,
/// so the stub can change it mid-exchange.
pub fn serve(listener: TcpListener, app: Arc<AppState>) {
    let router = Router::new()
        .route("/discord/oauth2/token", post(discord_token))
        .route("/discord/users/@me", get(discord_user))
        .route("/spotify/api/token", post(spotify_token))
        .route("/spotify/v1/me", get(spotify_profile))
        .route("/lastfm/2.0/", post(lastfm_session))
        .with_state(app);

    let server = axum::Server::from_tcp(listener)
        .expect("provider stub listener")
        .serve(router.into_make_service());
    tokio::spawn(server);
}

async fn accept_code(app: &AppState, code: Option<&String>) -> Result<(), StatusCode> {
    match code.map(String::as_str) {
        Some(GOOD_CODE) => Ok(()),
        Some(DELETING_CODE) => {
            let mut database = app.database.lock().await;
            database.delete_account(RACING_USER).unwrap();
            Ok(())
        }
        _ => Err(StatusCode::BAD_REQUEST),
    }
}

fn require_bearer(headers: &HeaderMap, token: &str) -> Result<(), StatusCode> {
    let expected = format!("Bearer {token}");
    match headers.get(header::AUTHORIZATION) {
        Some(value) if value.as_bytes() == expected.as_bytes() => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn discord_token(
    State(app): State<Arc<AppState>>,
    Form(params): Params,
) -> Result<Json<Value>, StatusCode> {
    if params.get("client_secret").map(String::as_str) != Some("discord_secret") {
        return Err(StatusCode::UNAUTHORIZED);
    }
    accept_code(&app, params.get("code")).await?;

    Ok(Json(json!({
        "access_token": "discord-access",
        "token_type": "Bearer",
        "expires_in": 604800,
        "refresh_token": "discord-refresh",
        "scope": "identify",
    })))
}

async fn discord_user(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    require_bearer(&headers, "discord-access")?;
    Ok(Json(json!({
        "id": DISCORD_ID.to_string(),
        "username": "nelly",
        "global_name": "Nelly",
    })))
}

async fn spotify_token(
    State(app): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(params): Params,
) -> Result<Json<Value>, StatusCode> {
    // Client credentials go in a basic auth header, not the form
    let basic = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if !basic.starts_with("Basic ") || params.contains_key("client_secret") {
        return Err(StatusCode::UNAUTHORIZED);
    }
    accept_code(&app, params.get("code")).await?;

    Ok(Json(json!({
        "access_token": "spotify-access",
        "token_type": "Bearer",
        "expires_in": 3600,
        "refresh_token": "spotify-refresh",
        "scope": "user-read-private playlist-read-private",
    })))
}

async fn spotify_profile(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    require_bearer(&headers, "spotify-access")?;
    Ok(Json(json!({"id": "wizzler", "display_name": "JM Wizzler"})))
}

async fn lastfm_session(
    State(app): State<Arc<AppState>>,
    Form(params): Params,
) -> Json<Value> {
    let signature = lastfm::api_signature(
        &[
            ("method", param(&params, "method")),
            ("api_key", param(&params, "api_key")),
            ("token", param(&params, "token")),
        ],
        "lastfm_secret",
    );

    // Last.fm answers errors with a 200 and an error body
    if param(&params, "method") != "auth.getSession" || param(&params, "api_sig") != signature {
        return Json(json!({"error": 13, "message": "Invalid method signature supplied"}));
    }
    if accept_code(&app, params.get("token")).await.is_err() {
        return Json(json!({"error": 4, "message": "Invalid authentication token supplied"}));
    }

    Json(json!({
        "session": {"name": "alice_fm", "key": "lastfm-session-key", "subscriber": 0}
    }))
}

fn param<'a>(params: &'a HashMap<String, String>, name: &str) -> &'a str {
    params.get(name).map(String::as_str).unwrap_or_default()
}
