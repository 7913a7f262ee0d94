pub mod cookie;
pub mod oauth_state;
pub mod token;
pub mod verify_session;

pub use verify_session::{current_session, purge_expired_sessions, require_session};
