use std::collections::HashSet;

use crate::{
    spotify::{MAX_TRACKS_PER_WRITE, PlaylistApi},
    types::Track,
    utils,
};

use super::PlaylistError;

/// Returns every occurrence of a track id after its first one, in the order
/// they are encountered.
pub fn find_duplicates(tracks: &[Track]) -> Vec<Track> {
    duplicate_positions(tracks)
        .into_iter()
        .map(|i| tracks[i].clone())
        .collect()
}

/// Playlist positions of the occurrences [`find_duplicates`] reports.
pub fn duplicate_positions(tracks: &[Track]) -> Vec<usize> {
    let mut seen_ids = HashSet::new();
    let mut positions = Vec::new();
    for (i, track) in tracks.iter().enumerate() {
        if !seen_ids.insert(track.id.as_str()) {
            positions.push(i);
        }
    }
    positions
}

/// Keeps the first occurrence of each track id.
pub fn dedup_tracks(mut tracks: Vec<Track>) -> Vec<Track> {
    let mut seen_ids = HashSet::new();
    tracks.retain(|track| seen_ids.insert(track.id.clone()));
    tracks
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemovalOutcome {
    /// The playlist had no duplicates; nothing was sent.
    NothingToDo,
    Removed {
        /// The duplicate occurrences that triggered the removal.
        duplicates: Vec<Track>,
        /// Playlist contents fetched again after the removal.
        refreshed: Vec<Track>,
    },
}

/// Groups the tracks of `kept` whose URI is in `removed_uris` into runs of
/// consecutive positions, returned as `(position, uris)` in ascending order.
pub fn restore_runs(kept: &[Track], removed_uris: &[String]) -> Vec<(usize, Vec<String>)> {
    let removed: HashSet<&str> = removed_uris.iter().map(String::as_str).collect();
    let mut runs: Vec<(usize, Vec<String>)> = Vec::new();
    for (index, track) in kept.iter().enumerate() {
        if !removed.contains(track.uri.as_str()) {
            continue;
        }
        match runs.last_mut() {
            Some((start, uris)) if *start + uris.len() == index => {
                uris.push(track.uri.clone());
                continue;
            }
            _ => {}
        }
        runs.push((index, vec![track.uri.clone()]));
    }
    runs
}

/// Removes duplicate tracks from a playlist and re-fetches it.
///
/// The API removes by URI, which drops every occurrence including the one
/// that should stay. The kept copies are therefore inserted again at their
/// first-occurrence positions, so the playlist ends up as [`dedup_tracks`] of
/// what was fetched. Both steps are sent in batches of at most
/// [`MAX_TRACKS_PER_WRITE`]; inserts go in ascending position order.
///
/// A failure between removal and re-insert leaves the kept copies missing.
pub async fn remove_duplicates<A: PlaylistApi>(
    api: &A,
    playlist_id: &str,
) -> Result<RemovalOutcome, PlaylistError> {
    let tracks = api
        .playlist_tracks(playlist_id)
        .await
        .map_err(PlaylistError::remote(format!("fetching tracks of {}", playlist_id)))?;

    let duplicates = find_duplicates(&tracks);
    if duplicates.is_empty() {
        return Ok(RemovalOutcome::NothingToDo);
    }

    let duplicate_uris: Vec<String> = duplicates.iter().map(|t| t.uri.clone()).collect();
    let removed_uris = utils::unique_ids(&duplicate_uris);
    for chunk in removed_uris.chunks(MAX_TRACKS_PER_WRITE) {
        api.remove_tracks(playlist_id, chunk)
            .await
            .map_err(PlaylistError::remote(format!(
                "removing duplicates from {}",
                playlist_id
            )))?;
    }

    let kept = dedup_tracks(tracks);
    for (position, uris) in restore_runs(&kept, &removed_uris) {
        for (n, chunk) in uris.chunks(MAX_TRACKS_PER_WRITE).enumerate() {
            api.insert_tracks(playlist_id, chunk, position + n * MAX_TRACKS_PER_WRITE)
                .await
                .map_err(PlaylistError::remote(format!(
                    "restoring kept tracks in {}",
                    playlist_id
                )))?;
        }
    }

    let refreshed = api
        .playlist_tracks(playlist_id)
        .await
        .map_err(PlaylistError::remote(format!("re-fetching {}", playlist_id)))?;

    Ok(RemovalOutcome::Removed {
        duplicates,
        refreshed,
    })
}
