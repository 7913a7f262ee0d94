use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::services::ServeDir;

use crate::{auth, model::AppState};

mod account;
mod link;
mod pages;
mod sessions;

pub fn router(state: Arc<AppState>) -> Router {
    // Everything in here needs a signed-in user
    let protected = Router::new()
        .route("/dashboard", get(pages::dashboard))
        .route("/linkspotify", get(link::link_spotify))
        .route("/spotifyoauth", get(link::spotify_callback))
        .route("/linklastfm", get(link::link_lastfm))
        .route("/lastfmtoken", get(link::lastfm_callback))
        .route("/unlink", get(link::unlink))
        .route("/deleteaccount", get(account::delete_account))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    Router::new()
        .route("/", get(pages::homepage))
        .route("/robots.txt", get(pages::robots))
        .route("/login", get(sessions::login))
        .route("/discordoauth", get(sessions::discord_callback))
        .route("/logout", get(sessions::logout))
        .merge(protected)
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .with_state(state)
}
