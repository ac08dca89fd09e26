use std::fmt;

use reqwest::StatusCode;

/// Failure of a single call against the Spotify Web API or its token endpoint.
#[derive(Debug)]
pub enum ApiError {
    /// Network failure or a body that did not decode.
    Http(reqwest::Error),
    /// Non-success status other than 401.
    Status { status: StatusCode, message: String },
    /// The bearer credential was rejected; the user has to log in again.
    Unauthorized,
    /// Authorization flow failure (token exchange, callback, timeout).
    Auth(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http(e) => write!(f, "request failed: {}", e),
            ApiError::Status { status, message } if message.is_empty() => {
                write!(f, "Spotify responded with {}", status)
            }
            ApiError::Status { status, message } => {
                write!(f, "Spotify responded with {}: {}", status, message)
            }
            ApiError::Unauthorized => write!(f, "access token was rejected"),
            ApiError::Auth(message) => write!(f, "authorization failed: {}", message),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.status() == Some(StatusCode::UNAUTHORIZED) {
            return ApiError::Unauthorized;
        }
        ApiError::Http(err)
    }
}
