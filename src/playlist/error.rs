use std::fmt;

use crate::spotify::ApiError;

/// Outcome of a failed playlist operation, split the way it is reported.
#[derive(Debug)]
pub enum PlaylistError {
    /// Precondition violated by the caller; no remote call was made.
    Usage(String),
    /// The credential is missing or was rejected.
    Unauthorized,
    /// A remote call failed; `context` names the step.
    Remote { context: String, source: ApiError },
}

impl PlaylistError {
    /// Wraps an API error with the step that failed.
    pub fn remote(context: impl Into<String>) -> impl FnOnce(ApiError) -> PlaylistError {
        let context = context.into();
        move |source| match source {
            ApiError::Unauthorized => PlaylistError::Unauthorized,
            source => PlaylistError::Remote { context, source },
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, PlaylistError::Usage(_))
    }
}

impl fmt::Display for PlaylistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaylistError::Usage(message) => f.write_str(message),
            PlaylistError::Unauthorized => f.write_str("not authenticated"),
            PlaylistError::Remote { context, source } => write!(f, "{}: {}", context, source),
        }
    }
}

impl std::error::Error for PlaylistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlaylistError::Remote { source, .. } => Some(source),
            _ => None,
        }
    }
}
