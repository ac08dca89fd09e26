//! Configuration management for the Spotify playlist organizer.
//!
//! Configuration values come from environment variables, optionally seeded
//! from a `.env` file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (everything except the client id)
//!
//! The values are collected once into a [`Config`] that is passed explicitly
//! to the API client and the authorization flow.

use std::{env, fmt, path::PathBuf};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_SCOPE: &str = "user-read-private user-read-email playlist-read-private playlist-modify-public playlist-modify-private";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 60;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the `sporgcli` data directory if it doesn't exist and loads
/// `sporgcli/.env` from it:
/// - Linux: `~/.local/share/sporgcli/.env`
/// - macOS: `~/Library/Application Support/sporgcli/.env`
/// - Windows: `%LOCALAPPDATA%/sporgcli/.env`
///
/// A missing `.env` file is not an error; the process environment alone may
/// carry the configuration.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the `.env`
/// file exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporgcli/.env");
    path
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has an invalid value '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime configuration for the API client and the authorization flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Address the local OAuth callback server binds to, e.g. `127.0.0.1:8888`.
    pub server_address: String,
    /// Client id registered on Spotify's developer dashboard.
    pub client_id: String,
    /// Callback URL; must match the one registered for the client id.
    pub redirect_uri: String,
    /// Space separated list of requested permissions.
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    /// Base URL of the Web API, without trailing slash.
    pub api_url: String,
    /// Seconds to wait for the browser to hit the callback.
    pub auth_timeout_secs: u64,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let client_id = get("SPOTIFY_API_AUTH_CLIENT_ID")
            .ok_or(ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID"))?;

        let auth_timeout_secs = match get("SPOTIFY_AUTH_TIMEOUT") {
            Some(value) => value.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                key: "SPOTIFY_AUTH_TIMEOUT",
                value,
            })?,
            None => DEFAULT_AUTH_TIMEOUT_SECS,
        };

        Ok(Self {
            server_address: or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            client_id,
            redirect_uri: or_default("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            scope: or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url: or_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: or_default("SPOTIFY_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            auth_timeout_secs,
        })
    }
}
