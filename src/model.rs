pub mod account;
pub mod credentials;
pub mod database;
pub mod provider;
pub mod session;

pub use account::{Account, ProviderLink};
pub use credentials::Credentials;
pub use database::Database;
pub use provider::Provider;
pub use session::Session;

use tera::Tera;
use tokio::sync::Mutex;

use crate::config::Config;

/// Discord user id; every record in the store hangs off one.
pub type UserId = i64;

pub struct AppState {
    pub config: Config,
    pub database: Mutex<Database>,
    pub templates: Tera,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config, database: Database, templates: Tera) -> AppState {
        AppState {
            config,
            database: Mutex::new(database),
            templates,
            http: reqwest::Client::new(),
        }
    }
}
