use chrono::Utc;

use crate::{config, spotify, types::Token};

// Refresh this long before Spotify's stated expiry.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Keeps an access token valid for the lifetime of the service.
///
/// Tokens live in memory only. The service starts from the refresh token in
/// the environment, so the first call to [`TokenManager::get_valid_token`]
/// always performs a refresh.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    /// Creates a manager holding only the configured refresh token.
    pub fn from_env() -> Result<Self, String> {
        let refresh_token = config::spotify_refresh_token()?;
        Ok(Self::new(Token {
            access_token: String::new(),
            refresh_token,
            scope: String::new(),
            expires_in: 0,
            obtained_at: 0,
        }))
    }

    /// Returns an access token, refreshing it first when it is (nearly) expired.
    ///
    /// # Errors
    ///
    /// Returns the refresh error; unlike a cached-token CLI there is no stale
    /// token worth falling back to.
    pub async fn get_valid_token(&mut self) -> Result<String, String> {
        if self.is_expired() {
            self.token = spotify::auth::refresh_token(&self.token.refresh_token).await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        if self.token.access_token.is_empty() {
            return true;
        }

        let now = Utc::now().timestamp() as u64;
        let expires_at = self.token.obtained_at + self.token.expires_in;
        now >= expires_at.saturating_sub(EXPIRY_MARGIN_SECS)
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
