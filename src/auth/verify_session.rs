use std::{sync::Arc, time::Duration};

use axum::{
    extract::{State, TypedHeader},
    headers::Cookie,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use log::{debug, error, trace};

use crate::{
    error::Result,
    model::{session, AppState, Provider, Session},
};

use super::{cookie, token::unix_now};

/// Middleware for pages that need a signed-in user.
/// Puts the [`Session`] into the request extensions, or redirects to `/login`.
pub async fn require_session<B>(
    State(state): State<Arc<AppState>>,
    cookies: Option<TypedHeader<Cookie>>,
    mut request: Request<B>,
    next: Next<B>,
) -> Response {
    let cookies = cookies.as_ref().map(|TypedHeader(cookies)| cookies);
    match current_session(&state, cookies).await {
        Ok(Some(session)) => {
            trace!("Request authenticated for user {}", session.user_id);
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Ok(None) => Redirect::to("/login").into_response(),
        Err(err) => err.into_response(),
    }
}

/// Look up the session named by the `token` cookie.
/// Expired sessions, and sessions whose user has no Discord identity left,
/// are deleted and reported as absent.
pub async fn current_session(state: &AppState, cookies: Option<&Cookie>) -> Result<Option<Session>> {
    let Some(token) = cookies.and_then(|cookies| cookies.get(cookie::SESSION)) else {
        trace!("No token cookie found");
        return Ok(None);
    };

    let database = state.database.lock().await;
    let Some(session) = database.get_session_from_token(token)? else {
        debug!("Session not found in database");
        return Ok(None);
    };

    if session.is_expired(state.config.session_ttl, unix_now()) {
        debug!("Session for user {} expired", session.user_id);
        database.delete_session(&session.token)?;
        return Ok(None);
    }

    if database
        .get_credentials(Provider::Discord, session.user_id)?
        .is_none()
    {
        debug!("No Discord identity stored for user {}", session.user_id);
        database.delete_session(&session.token)?;
        return Ok(None);
    }

    Ok(Some(session))
}

/// Periodically drop sessions older than the configured lifetime.
pub async fn purge_expired_sessions(state: Arc<AppState>, every: Duration) {
    let mut interval = tokio::time::interval(every);
    loop {
        interval.tick().await;

        let cutoff = unix_now().saturating_sub(session::ttl_secs(state.config.session_ttl));
        let database = state.database.lock().await;
        if let Err(err) = database.purge_sessions_before(cutoff) {
            error!("Failed to purge expired sessions: {}", err);
        }
    }
}
