use std::{net::SocketAddr, sync::Arc, time::Duration};

use blanco_dashboard::{
    auth, config::Config, logger, model::Database, routes, templates, AppState,
};
use log::info;

const PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    logger::init(config.log_level)?;

    info!("Starting blanco dashboard at {}", config.bind_address);

    let addr: SocketAddr = config.bind_address.parse()?;
    let database = Database::build(&config.database_path)?;
    let templates = templates::load(&config.template_dir)?;

    let state = Arc::new(AppState::new(config, database, templates));
    tokio::spawn(auth::purge_expired_sessions(state.clone(), PURGE_INTERVAL));

    let app = routes::router(state);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
