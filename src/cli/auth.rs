use std::sync::Arc;

use chrono::DateTime;
use tokio::sync::Mutex;

use crate::{
    config::Config,
    error, info,
    management::TokenManager,
    spotify::{self, ApiError, SpotifyClient},
    success,
    types::SharedPkceState,
    utils, warning,
};

/// Logs in and persists the credential.
///
/// Without `from_url` the PKCE flow runs through the browser and the local
/// callback server. With `from_url` the token is taken from the fragment of a
/// pasted implicit-grant callback URL.
pub async fn auth(config: &Config, from_url: Option<String>) {
    let token = match from_url {
        Some(url) => match utils::token_from_fragment(&url) {
            Some(token) => token,
            None => error!("No access_token found in the given URL."),
        },
        None => {
            let shared_state: SharedPkceState = Arc::new(Mutex::new(None));
            match spotify::auth::authorize(config, shared_state).await {
                Ok(token) => token,
                Err(e) => error!("Authentication failed. Err: {}", e),
            }
        }
    };

    let token_manager = TokenManager::new(token);
    if let Err(e) = token_manager.persist().await {
        error!("Failed to save token to cache: {}", e);
    }

    success!("Authentication successful!");
}

pub async fn logout() {
    match TokenManager::clear().await {
        Ok(true) => success!("Stored credential removed."),
        Ok(false) => info!("No stored credential found."),
        Err(e) => error!("Failed to remove stored credential: {}", e),
    }
}

/// Shows when the stored token expires and whom it belongs to.
pub async fn auth_status(config: Config) {
    let tokens = match TokenManager::load().await {
        Ok(t) => t,
        Err(_) => error!("Not logged in. Please run sporgcli auth"),
    };

    let expires_at = DateTime::from_timestamp(tokens.expires_at() as i64, 0)
        .map(|d| d.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let refreshable = !tokens.current_token().refresh_token.is_empty();

    if tokens.is_expired() && !refreshable {
        warning!("Token expired at {} and cannot be refreshed.", expires_at);
    } else {
        info!("Token valid until {}", expires_at);
    }

    let client = SpotifyClient::new(config, tokens);
    match client.get_current_user().await {
        Ok(user) => info!(
            "Logged in as {} ({})",
            user.display_name.unwrap_or_else(|| user.id.clone()),
            user.id
        ),
        Err(ApiError::Unauthorized) => {
            error!("The stored token was rejected. Please run sporgcli auth")
        }
        Err(e) => error!("Failed to fetch user profile. Err: {}", e),
    }
}
