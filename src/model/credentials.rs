use super::UserId;

/// Tokens a provider handed us for one user.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: UserId,
    /// Display name of the account on the provider's side.
    pub username: String,
    pub access_token: String,
    /// Empty for providers without refresh tokens.
    pub refresh_token: String,
    /// Unix seconds; 0 means the token never expires.
    pub expires_at: i64,
    pub scopes: Vec<String>,
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Don't print the tokens
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("expires_at", &self.expires_at)
            .field("scopes", &self.scopes)
            .finish()
    }
}
