use crate::{
    types::{Playlist, Track},
    utils::{PlaylistSortKey, TrackSortKey},
};

/// Case-insensitive substring match over name, artists and album.
pub fn search_tracks(tracks: &[Track], query: &str) -> Vec<Track> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return tracks.to_vec();
    }

    tracks
        .iter()
        .filter(|t| {
            t.name.to_lowercase().contains(&needle)
                || t.album.name.to_lowercase().contains(&needle)
                || t.artists
                    .iter()
                    .any(|a| a.name.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Stable sort; equal keys keep playlist order.
pub fn sort_tracks(tracks: &mut [Track], key: TrackSortKey, descending: bool) {
    tracks.sort_by(|a, b| {
        let ordering = match key {
            TrackSortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            TrackSortKey::Artist => first_artist(a).cmp(&first_artist(b)),
            TrackSortKey::Album => a.album.name.to_lowercase().cmp(&b.album.name.to_lowercase()),
            TrackSortKey::Duration => a.duration_ms.cmp(&b.duration_ms),
        };
        if descending { ordering.reverse() } else { ordering }
    });
}

fn first_artist(track: &Track) -> String {
    track
        .artists
        .first()
        .map(|a| a.name.to_lowercase())
        .unwrap_or_default()
}

pub fn search_playlists(playlists: &[Playlist], query: &str) -> Vec<Playlist> {
    let needle = query.trim().to_lowercase();
    playlists
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

pub fn sort_playlists(playlists: &mut [Playlist], key: PlaylistSortKey, descending: bool) {
    playlists.sort_by(|a, b| {
        let ordering = match key {
            PlaylistSortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            PlaylistSortKey::Tracks => a.track_count().cmp(&b.track_count()),
        };
        if descending { ordering.reverse() } else { ordering }
    });
}
