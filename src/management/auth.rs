use std::{fmt, io::Error, path::PathBuf};

use chrono::Utc;
use reqwest::Client;

use crate::{config::Config, spotify, types::Token, warning};

/// Seconds before the real expiry at which a token is already refreshed.
const EXPIRY_MARGIN_SECS: u64 = 240;

#[derive(Debug)]
pub enum TokenError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for TokenError {
    fn from(err: Error) -> Self {
        TokenError::IoError(err)
    }
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::IoError(e) => write!(f, "{}", e),
            TokenError::SerdeError(e) => write!(f, "malformed token file: {}", e),
        }
    }
}

impl std::error::Error for TokenError {}

/// The authentication context.
///
/// Created from a fresh token after login, rehydrated from the token file at
/// startup and removed again on logout.
pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        Self::with_path(token, Self::token_path())
    }

    pub fn with_path(token: Token, path: PathBuf) -> Self {
        TokenManager { token, path }
    }

    pub async fn load() -> Result<Self, TokenError> {
        Self::load_from(Self::token_path()).await
    }

    pub async fn load_from(path: PathBuf) -> Result<Self, TokenError> {
        let content = async_fs::read_to_string(&path).await?;
        let token: Token = serde_json::from_str(&content).map_err(TokenError::SerdeError)?;
        Ok(Self { token, path })
    }

    pub async fn persist(&self) -> Result<(), TokenError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(TokenError::SerdeError)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Deletes the persisted token. Returns `false` if there was none.
    pub async fn clear() -> Result<bool, TokenError> {
        Self::clear_at(Self::token_path()).await
    }

    pub async fn clear_at(path: PathBuf) -> Result<bool, TokenError> {
        match async_fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(TokenError::IoError(e)),
        }
    }

    /// Returns an access token, refreshing it first when it is about to expire.
    ///
    /// A failed refresh keeps the old token; the API will then answer 401 and
    /// the caller reports that the user has to log in again.
    pub async fn get_valid_token(&mut self, http: &Client, config: &Config) -> String {
        if self.is_expired() && !self.token.refresh_token.is_empty() {
            match spotify::auth::refresh_token(http, config, &self.token.refresh_token).await {
                Ok(new_token) => {
                    self.token = new_token;
                    if let Err(e) = self.persist().await {
                        warning!("Failed to save refreshed token: {}", e);
                    }
                }
                Err(e) => warning!("Failed to refresh token: {}", e),
            }
        }

        self.token.access_token.clone()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp() as u64)
    }

    pub fn is_expired_at(&self, now: u64) -> bool {
        now >= self.expires_at().saturating_sub(EXPIRY_MARGIN_SECS)
    }

    /// Unix timestamp at which the access token stops working.
    pub fn expires_at(&self) -> u64 {
        self.token.obtained_at + self.token.expires_in
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("sporgcli/cache/token.json");
        path
    }
}
