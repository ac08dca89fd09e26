//! # Spotify Integration Module
//!
//! This module is the integration layer between sporgcli and the Spotify Web
//! API. It handles authentication, HTTP transport, retries and the JSON wire
//! format, and exposes the remote operations the playlist utilities need
//! through the [`PlaylistApi`] trait.
//!
//! ## Architecture
//!
//! ```text
//! Command handlers (cli)
//!          ↓
//! Playlist utilities (duplicates, merge, stats)
//!          ↓
//! PlaylistApi  ←  SpotifyClient (token manager + reqwest)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Submodules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow, code exchange and token refresh
//! - [`client`] - Authenticated transport with 502/429 retry handling
//! - `playlists` - Playlist listing, items, create, add and remove
//! - `artists` - Batched artist lookup and the current user profile
//!
//! ## API Coverage
//!
//! - `GET /me` - current user profile
//! - `GET /me/playlists` - the user's playlists (all pages)
//! - `GET /playlists/{id}/tracks` - playlist items (all pages)
//! - `DELETE /playlists/{id}/tracks` - remove track URIs
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `POST /playlists/{id}/tracks` - add up to 100 track URIs
//! - `GET /artists?ids=` - up to 50 artists with genres
//! - `POST /api/token` - code exchange and refresh
//!
//! ## Authentication Context
//!
//! There is no global credential. A [`SpotifyClient`] owns a
//! [`crate::management::TokenManager`] handed to it at construction, so every
//! call site receives its credential explicitly through the client it was
//! given.

pub mod artists;
pub mod auth;
pub mod client;
mod error;
pub mod playlists;

pub use client::SpotifyClient;
pub use error::ApiError;

use crate::types::{Artist, CreatePlaylistRequest, CreatePlaylistResponse, Playlist, Track, UserProfile};

/// Maximum number of track URIs per add/remove call.
pub const MAX_TRACKS_PER_WRITE: usize = 100;

/// Maximum number of ids per several-artists lookup.
pub const MAX_ARTISTS_PER_LOOKUP: usize = 50;

/// Remote operations the playlist utilities are written against.
///
/// [`SpotifyClient`] is the production implementation; tests provide an
/// in-memory one.
#[allow(async_fn_in_trait)]
pub trait PlaylistApi {
    async fn current_user(&self) -> Result<UserProfile, ApiError>;

    async fn user_playlists(&self) -> Result<Vec<Playlist>, ApiError>;

    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Track>, ApiError>;

    /// Removes all occurrences of `uris`; returns the new snapshot id.
    async fn remove_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String, ApiError>;

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse, ApiError>;

    /// Appends at most [`MAX_TRACKS_PER_WRITE`] URIs; returns the new snapshot id.
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String, ApiError>;

    /// Inserts at most [`MAX_TRACKS_PER_WRITE`] URIs starting at `position`.
    async fn insert_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
        position: usize,
    ) -> Result<String, ApiError>;

    /// Looks up at most [`MAX_ARTISTS_PER_LOOKUP`] artists.
    async fn several_artists(&self, ids: &[String]) -> Result<Vec<Artist>, ApiError>;
}

impl PlaylistApi for SpotifyClient {
    async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.get_current_user().await
    }

    async fn user_playlists(&self) -> Result<Vec<Playlist>, ApiError> {
        self.get_user_playlists().await
    }

    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Track>, ApiError> {
        self.get_playlist_tracks(playlist_id).await
    }

    async fn remove_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String, ApiError> {
        self.remove_playlist_tracks(playlist_id, uris).await
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse, ApiError> {
        self.create_user_playlist(user_id, request).await
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String, ApiError> {
        self.add_playlist_tracks(playlist_id, uris, None).await
    }

    async fn insert_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
        position: usize,
    ) -> Result<String, ApiError> {
        self.add_playlist_tracks(playlist_id, uris, Some(position))
            .await
    }

    async fn several_artists(&self, ids: &[String]) -> Result<Vec<Artist>, ApiError> {
        self.get_several_artists(ids).await
    }
}
