use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use blanco_dashboard::{
    auth::token::unix_now,
    config::Config,
    model::{Credentials, Database, Provider, Session, UserId},
    routes, templates, AppState,
};
use tower::ServiceExt;

pub mod provider_stub;

/// Router plus state over an in-memory database.
pub fn create_test_app() -> (Router, Arc<AppState>) {
    build_app(Config::test_default())
}

/// Like [`create_test_app`], with Discord, Spotify and Last.fm served by a
/// local stub. Must be called from inside a tokio runtime.
#[allow(dead_code)]
pub fn create_test_app_with_providers() -> (Router, Arc<AppState>) {
    let (listener, base) = provider_stub::bind();
    let mut config = Config::test_default();
    provider_stub::point_at(&mut config, &base);

    let (app, state) = build_app(config);
    provider_stub::serve(listener, state.clone());
    (app, state)
}

fn build_app(config: Config) -> (Router, Arc<AppState>) {
    let database = Database::build(&config.database_path).expect("in-memory database");
    let templates = templates::load(&config.template_dir).expect("templates parse");

    let state = Arc::new(AppState::new(config, database, templates));
    (routes::router(state.clone()), state)
}

pub fn credentials(user_id: UserId, username: &str) -> Credentials {
    Credentials {
        user_id,
        username: username.to_string(),
        access_token: format!("{username}-access"),
        refresh_token: String::new(),
        expires_at: 0,
        scopes: Vec::new(),
    }
}

/// Store a Discord identity and a fresh session; returns the session token.
#[allow(dead_code)]
pub async fn sign_in(state: &AppState, user_id: UserId, name: &str) -> String {
    let session = Session::new(format!("token-{user_id}"), user_id, unix_now());
    let database = state.database.lock().await;
    database
        .set_credentials(Provider::Discord, &credentials(user_id, name))
        .unwrap();
    database.add_session(&session).unwrap();
    session.token
}

#[allow(dead_code)]
pub async fn link(state: &AppState, provider: Provider, user_id: UserId, name: &str) {
    let database = state.database.lock().await;
    database
        .set_credentials(provider, &credentials(user_id, name))
        .unwrap();
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut request = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }

    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_text(response: Response) -> String {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[allow(dead_code)]
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect has a location")
        .to_str()
        .unwrap()
}

#[allow(dead_code)]
pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

/// Value of a `Set-Cookie` header, without its attributes.
#[allow(dead_code)]
pub fn cookie_value(set_cookie: &str) -> &str {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.split_once('='))
        .map(|(_, value)| value)
        .unwrap_or_default()
}

#[allow(dead_code)]
pub fn find_cookie(cookies: &[String], name: &str) -> String {
    cookies
        .iter()
        .find(|value| value.starts_with(&format!("{name}=")))
        .cloned()
        .unwrap_or_else(|| panic!("missing Set-Cookie header for {name}: {cookies:?}"))
}
