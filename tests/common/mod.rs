#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use reqwest::StatusCode;
use sporgcli::{
    spotify::{ApiError, PlaylistApi},
    types::{
        Artist, CreatePlaylistRequest, CreatePlaylistResponse, Playlist, PlaylistOwner,
        PlaylistTracksRef, Track, TrackAlbum, TrackArtist, UserProfile,
    },
};

pub const USER_ID: &str = "test-user";

// Helper function to create a test track whose artist id is derived from the name
pub fn track(id: &str) -> Track {
    track_with(id, &format!("Song {}", id), &["Artist A"], "Album", 180_000)
}

pub fn track_with(id: &str, name: &str, artists: &[&str], album: &str, duration_ms: u64) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        uri: format!("spotify:track:{}", id),
        duration_ms,
        artists: artists
            .iter()
            .map(|a| TrackArtist {
                id: format!("{}_id", a.to_lowercase().replace(' ', "_")),
                name: a.to_string(),
            })
            .collect(),
        album: TrackAlbum {
            name: album.to_string(),
        },
    }
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

pub fn ids_of(tracks: &[Track]) -> Vec<String> {
    tracks.iter().map(|t| t.id.clone()).collect()
}

pub fn playlist(id: &str, name: &str, total: u64) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        owner: PlaylistOwner {
            id: USER_ID.to_string(),
            display_name: Some("Test User".to_string()),
        },
        public: Some(false),
        tracks_ref: PlaylistTracksRef { total },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CurrentUser,
    UserPlaylists,
    PlaylistTracks(String),
    RemoveTracks(String, Vec<String>),
    CreatePlaylist(String, CreatePlaylistRequest),
    AddTracks(String, Vec<String>),
    InsertTracks(String, Vec<String>, usize),
    SeveralArtists(Vec<String>),
}

/// In-memory stand-in for the Spotify API that records every call.
#[derive(Default)]
pub struct FakeApi {
    pub playlists: Mutex<HashMap<String, Vec<Track>>>,
    pub genres: HashMap<String, Vec<String>>,
    pub calls: Mutex<Vec<Call>>,
    pub fail_tracks_for: Option<String>,
    pub fail_create: bool,
    /// 1-based index of the add-tracks call that fails.
    pub fail_add_call: Option<usize>,
    pub reject_token: bool,
}

impl FakeApi {
    pub fn with_playlists(playlists: &[(&str, Vec<Track>)]) -> Self {
        let map = playlists
            .iter()
            .map(|(id, tracks)| (id.to_string(), tracks.clone()))
            .collect();
        Self {
            playlists: Mutex::new(map),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn contents(&self, playlist_id: &str) -> Vec<Track> {
        self.playlists
            .lock()
            .unwrap()
            .get(playlist_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn add_calls(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::AddTracks(_, uris) => Some(uris),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_token(&self) -> Result<(), ApiError> {
        if self.reject_token {
            return Err(ApiError::Unauthorized);
        }
        Ok(())
    }
}

pub fn server_error() -> ApiError {
    ApiError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: "boom".to_string(),
    }
}

impl PlaylistApi for FakeApi {
    async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.record(Call::CurrentUser);
        self.check_token()?;
        Ok(UserProfile {
            id: USER_ID.to_string(),
            display_name: Some("Test User".to_string()),
            email: None,
        })
    }

    async fn user_playlists(&self) -> Result<Vec<Playlist>, ApiError> {
        self.record(Call::UserPlaylists);
        self.check_token()?;
        let map = self.playlists.lock().unwrap();
        let mut ids: Vec<&String> = map.keys().collect();
        ids.sort();
        Ok(ids
            .into_iter()
            .map(|id| playlist(id, id, map[id].len() as u64))
            .collect())
    }

    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Track>, ApiError> {
        self.record(Call::PlaylistTracks(playlist_id.to_string()));
        self.check_token()?;
        if self.fail_tracks_for.as_deref() == Some(playlist_id) {
            return Err(server_error());
        }
        self.playlists
            .lock()
            .unwrap()
            .get(playlist_id)
            .cloned()
            .ok_or(ApiError::Status {
                status: StatusCode::NOT_FOUND,
                message: "Invalid playlist Id".to_string(),
            })
    }

    async fn remove_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String, ApiError> {
        self.record(Call::RemoveTracks(playlist_id.to_string(), uris.to_vec()));
        self.check_token()?;
        let mut map = self.playlists.lock().unwrap();
        let tracks = map.entry(playlist_id.to_string()).or_default();
        tracks.retain(|t| !uris.contains(&t.uri));
        Ok("snapshot-removed".to_string())
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse, ApiError> {
        self.record(Call::CreatePlaylist(user_id.to_string(), request.clone()));
        self.check_token()?;
        if self.fail_create {
            return Err(server_error());
        }
        let id = "merged-1".to_string();
        self.playlists
            .lock()
            .unwrap()
            .insert(id.clone(), Vec::new());
        Ok(CreatePlaylistResponse {
            id,
            name: request.name.clone(),
            description: Some(request.description.clone()),
            public: Some(request.public),
        })
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String, ApiError> {
        self.record(Call::AddTracks(playlist_id.to_string(), uris.to_vec()));
        self.check_token()?;
        if self.fail_add_call == Some(self.add_calls().len()) {
            return Err(server_error());
        }
        let mut map = self.playlists.lock().unwrap();
        let tracks = map.entry(playlist_id.to_string()).or_default();
        for uri in uris {
            let id = uri.trim_start_matches("spotify:track:");
            tracks.push(track(id));
        }
        Ok("snapshot-added".to_string())
    }

    async fn insert_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
        position: usize,
    ) -> Result<String, ApiError> {
        self.record(Call::InsertTracks(
            playlist_id.to_string(),
            uris.to_vec(),
            position,
        ));
        self.check_token()?;
        let mut map = self.playlists.lock().unwrap();
        let tracks = map.entry(playlist_id.to_string()).or_default();
        if position > tracks.len() {
            return Err(ApiError::Status {
                status: StatusCode::BAD_REQUEST,
                message: "Index out of bounds".to_string(),
            });
        }
        for (offset, uri) in uris.iter().enumerate() {
            let id = uri.trim_start_matches("spotify:track:");
            tracks.insert(position + offset, track(id));
        }
        Ok("snapshot-inserted".to_string())
    }

    async fn several_artists(&self, ids: &[String]) -> Result<Vec<Artist>, ApiError> {
        self.record(Call::SeveralArtists(ids.to_vec()));
        self.check_token()?;
        Ok(ids
            .iter()
            .filter_map(|id| {
                self.genres.get(id).map(|genres| Artist {
                    id: id.clone(),
                    name: id.clone(),
                    genres: genres.clone(),
                })
            })
            .collect())
    }
}
