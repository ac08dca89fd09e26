use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::{sync::Mutex, time::sleep};

use crate::{config::Config, management::TokenManager, warning};

use super::ApiError;

const MAX_RETRIES: u32 = 3;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Authenticated Spotify Web API client.
///
/// Owns the authentication context: every request asks the token manager
/// for a valid bearer token, which refreshes it when it is about to expire.
pub struct SpotifyClient {
    http: Client,
    config: Config,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(config: Config, tokens: TokenManager) -> Self {
        Self {
            http: Client::new(),
            config,
            tokens: Mutex::new(tokens),
        }
    }

    /// Absolute URL for an API path such as `/me/playlists`.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    async fn bearer(&self) -> String {
        let mut tokens = self.tokens.lock().await;
        tokens.get_valid_token(&self.http, &self.config).await
    }

    /// Sends the request built by `build`, retrying on 502 and 429.
    ///
    /// 502 responses are retried after 10 seconds, 429 responses after the
    /// `Retry-After` delay as long as it does not exceed two minutes. Both
    /// share a budget of three retries.
    pub(crate) async fn execute<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut retries = 0;

        loop {
            let token = self.bearer().await;
            let response = build(&self.http).bearer_auth(token).send().await?;
            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            match status {
                StatusCode::UNAUTHORIZED => return Err(ApiError::Unauthorized),
                StatusCode::BAD_GATEWAY if retries < MAX_RETRIES => {
                    retries += 1;
                    sleep(BAD_GATEWAY_DELAY).await;
                    continue;
                }
                StatusCode::TOO_MANY_REQUESTS if retries < MAX_RETRIES => {
                    let retry_after = retry_after_secs(&response);
                    if retry_after <= MAX_RETRY_AFTER_SECS {
                        retries += 1;
                        sleep(Duration::from_secs(retry_after)).await;
                        continue;
                    }
                    warning!(
                        "Retry after has reached an abnormal high of {} seconds. Try again later.",
                        retry_after
                    );
                }
                _ => {}
            }

            let message = error_message(response).await;
            return Err(ApiError::Status { status, message });
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.execute(|http| http.get(url)).await?;
        Ok(response.json::<T>().await?)
    }
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(1)
}

/// Pulls the human readable message out of a Spotify error body.
pub(crate) async fn error_message(response: Response) -> String {
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<Value>(&body) {
        Ok(json) => json["error"]["message"]
            .as_str()
            .or_else(|| json["error_description"].as_str())
            .or_else(|| json["error"].as_str())
            .unwrap_or_default()
            .to_string(),
        Err(_) => body.trim().to_string(),
    }
}
