use chrono::NaiveDate;

use crate::{
    spotify::{MAX_TRACKS_PER_WRITE, PlaylistApi},
    types::{CreatePlaylistRequest, CreatePlaylistResponse},
    utils,
};

use super::{PlaylistError, dedup_tracks};

pub const MIN_MERGE_SOURCES: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub playlist: CreatePlaylistResponse,
    pub source_count: usize,
    /// Tracks across all sources before deduplication.
    pub total_tracks: usize,
    /// Tracks written to the new playlist.
    pub unique_tracks: usize,
    /// Number of add-track calls issued.
    pub batches: usize,
}

/// Request used for the merged playlist: dated name, fixed tag, private.
pub fn merged_playlist_request(date: NaiveDate) -> CreatePlaylistRequest {
    CreatePlaylistRequest {
        name: utils::merged_playlist_name(date),
        description: utils::MERGED_PLAYLIST_DESCRIPTION.to_string(),
        public: false,
        collaborative: false,
    }
}

/// Merges several playlists into a new one without duplicate tracks.
///
/// Sources are fetched one after another in the given order, their tracks
/// concatenated and deduplicated by id (first occurrence wins across all
/// sources). A private playlist is created for the current user and the
/// unique track URIs are written in sequential batches of at most
/// [`MAX_TRACKS_PER_WRITE`].
///
/// Repeated ids in `playlist_ids` count once. Fewer than two distinct ids is
/// a usage error and makes no remote call.
///
/// A failure after the playlist was created leaves it partially filled.
pub async fn merge_playlists<A: PlaylistApi>(
    api: &A,
    playlist_ids: &[String],
    date: NaiveDate,
) -> Result<MergeOutcome, PlaylistError> {
    let sources = utils::unique_ids(playlist_ids);
    if sources.len() < MIN_MERGE_SOURCES {
        return Err(PlaylistError::Usage(format!(
            "Select at least {} playlists to merge ({} selected).",
            MIN_MERGE_SOURCES,
            sources.len()
        )));
    }

    let mut all_tracks = Vec::new();
    for id in &sources {
        let tracks = api
            .playlist_tracks(id)
            .await
            .map_err(PlaylistError::remote(format!("fetching tracks of {}", id)))?;
        all_tracks.extend(tracks);
    }

    let total_tracks = all_tracks.len();
    let unique = dedup_tracks(all_tracks);

    let user = api
        .current_user()
        .await
        .map_err(PlaylistError::remote("fetching current user"))?;

    let playlist = api
        .create_playlist(&user.id, &merged_playlist_request(date))
        .await
        .map_err(PlaylistError::remote("creating merged playlist"))?;

    let uris: Vec<String> = unique.iter().map(|t| t.uri.clone()).collect();
    let mut batches = 0;
    for chunk in uris.chunks(MAX_TRACKS_PER_WRITE) {
        api.add_tracks(&playlist.id, chunk)
            .await
            .map_err(PlaylistError::remote(format!(
                "adding tracks to {} (batch {})",
                playlist.id,
                batches + 1
            )))?;
        batches += 1;
    }

    Ok(MergeOutcome {
        playlist,
        source_count: sources.len(),
        total_tracks,
        unique_tracks: unique.len(),
        batches,
    })
}
