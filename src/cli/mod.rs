//! # CLI Module
//!
//! Command handlers invoked by the dispatcher in `main`. Each handler runs one
//! user-facing operation end to end: it loads whatever local state it needs,
//! calls into [`crate::playlist`] or the API client, and presents the result
//! with the coloured output macros, `indicatif` spinners and `tabled` tables.
//!
//! ## Commands
//!
//! - [`auth`], [`auth_status`], [`logout`] - credential lifecycle
//! - [`list_playlists`] - the user's playlists with search and sort
//! - [`list_tracks`] - one playlist's tracks with search and sort
//! - [`duplicates`] - list or remove duplicate tracks
//! - [`list_selection`], [`select_add`], [`select_remove`], [`select_toggle`],
//!   [`select_clear`] - the persisted selection set
//! - [`merge`] - merge selected or given playlists into a new one
//! - [`stats`] - aggregate statistics over selected or given playlists
//!
//! ## Error Reporting
//!
//! Failures stop at the handler. Usage mistakes, missing credentials and
//! remote failures each get their own message and the process exits with
//! status 1; nothing is retried at this level.

mod auth;
mod duplicates;
mod merge;
mod playlists;
mod select;
mod stats;
mod tracks;

pub use auth::auth;
pub use auth::auth_status;
pub use auth::logout;
pub use duplicates::duplicates;
pub use merge::merge;
pub use playlists::list_playlists;
pub use select::list_selection;
pub use select::select_add;
pub use select::select_clear;
pub use select::select_remove;
pub use select::select_toggle;
pub use select::selection_rows;
pub use stats::stats;
pub use tracks::list_tracks;

use crate::{
    config::Config,
    error,
    management::{SelectionManager, TokenManager},
    playlist::PlaylistError,
    spotify::SpotifyClient,
};

/// Rehydrates the stored credential and builds the API client around it.
pub async fn connect(config: Config) -> SpotifyClient {
    let tokens = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => error!(
            "Failed to load token. Please run sporgcli auth\n Error: {}",
            e
        ),
    };
    SpotifyClient::new(config, tokens)
}

/// Like [`connect`], but `None` when no credential is stored.
pub async fn try_connect(config: Config) -> Option<SpotifyClient> {
    let tokens = TokenManager::load().await.ok()?;
    Some(SpotifyClient::new(config, tokens))
}

pub(crate) fn report(err: PlaylistError) -> ! {
    match err {
        PlaylistError::Usage(message) => error!("{}", message),
        PlaylistError::Unauthorized => {
            error!("Not authenticated or the token has expired. Please run sporgcli auth")
        }
        PlaylistError::Remote { context, source } => {
            error!("Failed {}. Err: {}", context, source)
        }
    }
}

/// Loads the persisted selection, exiting on a malformed file.
pub async fn load_selection() -> SelectionManager {
    match SelectionManager::load_or_default().await {
        Ok(selection) => selection,
        Err(e) => error!("Failed to load selection. Err: {}", e),
    }
}
