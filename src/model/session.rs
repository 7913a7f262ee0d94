use std::time::Duration;

use crate::auth;

use super::UserId;

pub type Token = String;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: Token,
    pub user_id: UserId,
    /// Unix seconds.
    pub created_at: i64,
}

impl Session {
    pub fn new(token: Token, user_id: UserId, created_at: i64) -> Session {
        Session {
            token,
            user_id,
            created_at,
        }
    }

    pub fn generate(user_id: UserId) -> Session {
        let token = auth::token::generate_token();
        Session::new(token, user_id, auth::token::unix_now())
    }

    pub fn is_expired(&self, ttl: Duration, now: i64) -> bool {
        self.created_at.saturating_add(ttl_secs(ttl)) <= now
    }
}

/// `ttl` in whole seconds, clamped to what a unix timestamp can hold.
pub fn ttl_secs(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)
}
