use std::sync::Arc;

use axum::{
    extract::{Query, State, TypedHeader},
    headers::Cookie,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    Extension,
};
use axum_macros::debug_handler;
use log::{debug, info};
use serde::Deserialize;

use crate::{
    auth::{cookie, oauth_state},
    error::{AppError, Result},
    model::{AppState, Credentials, Provider, Session},
    providers::{lastfm, spotify},
};

use super::sessions::CallbackParams;

#[debug_handler]
pub async fn link_spotify(State(state): State<Arc<AppState>>) -> Response {
    let nonce = oauth_state::generate_state();
    let state_cookie = oauth_state::state_cookie(&nonce, state.config.cookie_secure);
    let url = spotify::authorize_url(&state.config, &nonce);

    ([(SET_COOKIE, state_cookie)], Redirect::to(&url)).into_response()
}

#[debug_handler]
pub async fn spotify_callback(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    cookies: Option<TypedHeader<Cookie>>,
    Query(params): Query<CallbackParams>,
) -> Response {
    let clear_state = cookie::clear_cookie(cookie::OAUTH_STATE, state.config.cookie_secure);
    let cookies = cookies.as_ref().map(|TypedHeader(cookies)| cookies);
    let result = complete_spotify_link(&state, &session, cookies, params).await;

    (AppendHeaders([(SET_COOKIE, clear_state)]), result).into_response()
}

async fn complete_spotify_link(
    state: &AppState,
    session: &Session,
    cookies: Option<&Cookie>,
    params: CallbackParams,
) -> Result<Redirect> {
    if let Some(error) = params.error {
        debug!("User {} declined Spotify: {}", session.user_id, error);
        return Ok(Redirect::to("/dashboard"));
    }

    oauth_state::verify_state(cookies, params.state.as_deref())?;
    let code = params
        .code
        .ok_or_else(|| AppError::BadRequest("missing code".to_string()))?;

    let credentials =
        spotify::exchange_code(&state.http, &state.config, session.user_id, &code).await?;

    save_link(state, session, Provider::Spotify, &credentials).await
}

/// Store freshly linked credentials, unless the session ended while the
/// provider was being asked.
async fn save_link(
    state: &AppState,
    session: &Session,
    provider: Provider,
    credentials: &Credentials,
) -> Result<Redirect> {
    let database = state.database.lock().await;
    if database.get_session_from_token(&session.token)?.is_none() {
        debug!(
            "Session for user {} ended while linking {}, discarding",
            session.user_id, provider
        );
        return Ok(Redirect::to("/login"));
    }

    database.set_credentials(provider, credentials)?;
    Ok(Redirect::to("/dashboard"))
}

#[debug_handler]
pub async fn link_lastfm(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::to(&lastfm::auth_url(&state.config))
}

#[derive(Debug, Deserialize)]
pub struct LastfmCallback {
    token: Option<String>,
}

#[debug_handler]
pub async fn lastfm_callback(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(params): Query<LastfmCallback>,
) -> Result<Redirect> {
    let token = params
        .token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::BadRequest("missing token".to_string()))?;

    let credentials =
        lastfm::get_session(&state.http, &state.config, session.user_id, &token).await?;

    save_link(&state, &session, Provider::LastFm, &credentials).await
}

#[derive(Debug, Deserialize)]
pub struct UnlinkParams {
    service: String,
}

#[debug_handler]
pub async fn unlink(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(params): Query<UnlinkParams>,
) -> Result<Redirect> {
    let provider: Provider = params
        .service
        .parse()
        .map_err(|err: crate::model::provider::UnknownProvider| {
            AppError::BadRequest(err.to_string())
        })?;

    if !provider.is_linkable() {
        return Err(AppError::BadRequest(format!(
            "{} can't be unlinked, delete the account instead",
            provider.name()
        )));
    }

    let database = state.database.lock().await;
    if database.delete_credentials(provider, session.user_id)? {
        info!("User {} unlinked {}", session.user_id, provider);
    }

    Ok(Redirect::to("/dashboard"))
}
