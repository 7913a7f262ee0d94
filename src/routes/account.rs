use std::sync::Arc;

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use axum_macros::debug_handler;

use crate::{
    auth::cookie,
    error::Result,
    model::{AppState, Session},
};

/// Irreversible, and deliberately asks for no confirmation.
#[debug_handler]
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Response> {
    state
        .database
        .lock()
        .await
        .delete_account(session.user_id)?;

    let cleared = cookie::clear_cookie(cookie::SESSION, state.config.cookie_secure);
    Ok(([(SET_COOKIE, cleared)], Redirect::to("/")).into_response())
}
