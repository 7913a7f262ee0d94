use axum::headers::Cookie;

use crate::error::{AppError, Result};

use super::{cookie, token};

/// Nonce for the `state` parameter of an OAuth authorization request.
/// It goes into a cookie and must come back unchanged on the callback.
pub fn generate_state() -> String {
    token::generate_token()
}

pub fn state_cookie(state: &str, secure: bool) -> String {
    cookie::make_cookie(cookie::OAUTH_STATE, state, cookie::OAUTH_STATE_MAX_AGE, secure)
}

pub fn verify_state(cookies: Option<&Cookie>, received: Option<&str>) -> Result<()> {
    let expected = cookies.and_then(|cookies| cookies.get(cookie::OAUTH_STATE));
    match (expected, received) {
        (Some(expected), Some(received)) if !expected.is_empty() && expected == received => Ok(()),
        _ => Err(AppError::InvalidState),
    }
}
