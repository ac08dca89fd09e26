use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::Config,
    info,
    server::start_api_server,
    types::{PkceToken, SharedPkceState, Token},
    utils, warning,
};

use super::{ApiError, client::error_message};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    scope: Option<String>,
    expires_in: Option<u64>,
}

impl TokenResponse {
    fn into_token(self, previous_refresh_token: Option<&str>) -> Token {
        Token {
            access_token: self.access_token,
            refresh_token: self
                .refresh_token
                .or_else(|| previous_refresh_token.map(str::to_string))
                .unwrap_or_default(),
            scope: self.scope.unwrap_or_default(),
            expires_in: self.expires_in.unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        }
    }
}

/// Runs the OAuth 2.0 authorization code flow with PKCE.
///
/// 1. Generates the code verifier and its S256 challenge
/// 2. Stores the verifier in `shared_state` for the callback handler
/// 3. Starts the local callback server
/// 4. Opens the authorization URL in the default browser
/// 5. Waits until the callback handler has exchanged the code for a token
///
/// The caller decides what to do with the token (usually persist it).
///
/// # Errors
///
/// Returns [`ApiError::Auth`] when the URL cannot be built or no token arrives
/// within `config.auth_timeout_secs`.
pub async fn authorize(config: &Config, shared_state: SharedPkceState) -> Result<Token, ApiError> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    // store verifier before the browser can redirect back
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    let server_state = Arc::clone(&shared_state);
    let server_config = Arc::new(config.clone());
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state, server_config).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = utils::build_authorize_url(config, &code_challenge).map_err(ApiError::Auth)?;

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    } else {
        info!("Waiting for authorization in your browser...");
    }

    wait_for_token(shared_state, Duration::from_secs(config.auth_timeout_secs))
        .await
        .ok_or_else(|| ApiError::Auth("timed out waiting for the callback".to_string()))
}

/// Polls the shared state once per second until the callback stored a token.
pub async fn wait_for_token(shared_state: SharedPkceState, max_wait: Duration) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges a refresh token for a fresh access token.
///
/// Spotify may omit the refresh token in the response, in which case the
/// previous one stays valid and is carried over.
pub async fn refresh_token(
    http: &Client,
    config: &Config,
    refresh_token: &str,
) -> Result<Token, ApiError> {
    let res = http
        .post(&config.token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", config.client_id.as_str()),
        ])
        .send()
        .await?;

    if !res.status().is_success() {
        return Err(ApiError::Auth(error_message(res).await));
    }

    let json = res.json::<TokenResponse>().await?;
    Ok(json.into_token(Some(refresh_token)))
}

/// Exchanges the authorization code from the callback for a token.
///
/// The verifier must be the one whose challenge was sent with the
/// authorization request.
pub async fn exchange_code_pkce(
    http: &Client,
    config: &Config,
    code: &str,
    verifier: &str,
) -> Result<Token, ApiError> {
    let res = http
        .post(&config.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", config.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    if !res.status().is_success() {
        return Err(ApiError::Auth(error_message(res).await));
    }

    let json = res.json::<TokenResponse>().await?;
    Ok(json.into_token(None))
}
