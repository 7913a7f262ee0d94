use std::sync::Arc;

use axum::{
    extract::{State, TypedHeader},
    headers::Cookie,
    response::{Html, IntoResponse, Redirect, Response},
    Extension,
};
use axum_macros::debug_handler;
use log::debug;
use tera::Context;

use crate::{
    auth, dashboard,
    error::Result,
    model::{Account, AppState, Session},
};

#[debug_handler]
pub async fn homepage(
    State(state): State<Arc<AppState>>,
    cookies: Option<TypedHeader<Cookie>>,
) -> Result<Html<String>> {
    let cookies = cookies.as_ref().map(|TypedHeader(cookies)| cookies);
    let session = auth::current_session(&state, cookies).await?;

    let mut context = Context::new();
    context.insert("logged_in", &session.is_some());

    let rendered = state.templates.render("homepage.html", &context)?;
    Ok(Html(rendered))
}

#[debug_handler]
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Response> {
    let account = {
        let database = state.database.lock().await;
        Account::load(&database, session.user_id)?
    };

    let Some(account) = account else {
        debug!("No Discord identity stored for user {}", session.user_id);
        return Ok(Redirect::to("/login").into_response());
    };

    let rendered = dashboard::render(&state.templates, &account)?;
    Ok(Html(rendered).into_response())
}

pub async fn robots() -> &'static str {
    "User-agent: *\nDisallow: /\n"
}
