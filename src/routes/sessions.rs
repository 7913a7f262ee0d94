use std::sync::Arc;

use axum::{
    extract::{Query, State, TypedHeader},
    headers::Cookie,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use axum_macros::debug_handler;
use log::{debug, info};
use serde::Deserialize;

use crate::{
    auth::{self, cookie, oauth_state},
    error::{AppError, Result},
    model::{AppState, Provider, Session},
    providers::discord,
};

/// Query of an OAuth2 authorization callback.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set instead of `code` when the user declined.
    pub error: Option<String>,
}

#[debug_handler]
pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Option<TypedHeader<Cookie>>,
) -> Result<Response> {
    let cookies = cookies.as_ref().map(|TypedHeader(cookies)| cookies);
    if auth::current_session(&state, cookies).await?.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let nonce = oauth_state::generate_state();
    let state_cookie = oauth_state::state_cookie(&nonce, state.config.cookie_secure);
    let url = discord::authorize_url(&state.config, &nonce);

    debug!("Redirecting to Discord for login");
    Ok(([(SET_COOKIE, state_cookie)], Redirect::to(&url)).into_response())
}

/// The state cookie is spent by any callback, whatever the outcome.
#[debug_handler]
pub async fn discord_callback(
    State(state): State<Arc<AppState>>,
    cookies: Option<TypedHeader<Cookie>>,
    Query(params): Query<CallbackParams>,
) -> Response {
    let clear_state = cookie::clear_cookie(cookie::OAUTH_STATE, state.config.cookie_secure);
    let cookies = cookies.as_ref().map(|TypedHeader(cookies)| cookies);
    let result = complete_login(&state, cookies, params).await;

    (AppendHeaders([(SET_COOKIE, clear_state)]), result).into_response()
}

async fn complete_login(
    state: &AppState,
    cookies: Option<&Cookie>,
    params: CallbackParams,
) -> Result<Response> {
    if let Some(error) = params.error {
        debug!("Discord login declined: {}", error);
        return Ok(Redirect::to("/").into_response());
    }

    oauth_state::verify_state(cookies, params.state.as_deref())?;
    let code = params
        .code
        .ok_or_else(|| AppError::BadRequest("missing code".to_string()))?;

    let credentials = discord::exchange_code(&state.http, &state.config, &code).await?;
    let session = Session::generate(credentials.user_id);

    {
        let database = state.database.lock().await;
        database.set_credentials(Provider::Discord, &credentials)?;
        database.add_session(&session)?;
    }

    let session_cookie = cookie::make_cookie(
        cookie::SESSION,
        &session.token,
        state.config.session_ttl.as_secs(),
        state.config.cookie_secure,
    );

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie)]),
        Redirect::to("/dashboard"),
    )
        .into_response())
}

#[debug_handler]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    cookies: Option<TypedHeader<Cookie>>,
) -> Result<Response> {
    let token = cookies
        .as_ref()
        .and_then(|TypedHeader(cookies)| cookies.get(cookie::SESSION));

    if let Some(token) = token {
        let database = state.database.lock().await;
        if let Some(session) = database.get_session_from_token(token)? {
            database.delete_session(&session.token)?;
            info!("User {} logged out", session.user_id);
        }
    }

    let cleared = cookie::clear_cookie(cookie::SESSION, state.config.cookie_secure);
    Ok(([(SET_COOKIE, cleared)], Redirect::to("/")).into_response())
}
