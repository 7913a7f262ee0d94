/// Holds the session token.
pub const SESSION: &str = "token";
/// Holds the nonce of an OAuth flow in progress.
pub const OAUTH_STATE: &str = "oauth_state";

pub const OAUTH_STATE_MAX_AGE: u64 = 10 * 60;

pub fn make_cookie(name: &str, value: &str, max_age: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        name, value, max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn clear_cookie(name: &str, secure: bool) -> String {
    make_cookie(name, "", 0, secure)
}
