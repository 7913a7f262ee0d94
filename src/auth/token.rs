use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use rand_core::OsRng;

use crate::model::session::Token;

/// 128 random bits, hex encoded.
pub fn generate_token() -> Token {
    let value: u128 = OsRng.gen();
    format!("{:032x}", value)
}

pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}
