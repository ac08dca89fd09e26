use std::collections::HashMap;

use crate::{
    spotify::{MAX_ARTISTS_PER_LOOKUP, PlaylistApi},
    types::Track,
    utils,
};

use super::PlaylistError;

/// Counts keyed by name, iterated in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn count(&self, key: &str) -> usize {
        self.index.get(key).map_or(0, |&pos| self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// The `n` most frequent entries; ties keep first-appearance order.
    pub fn top(&self, n: usize) -> Vec<(String, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistStats {
    pub playlist_count: usize,
    /// Every track of every playlist, repeats included.
    pub total_tracks: usize,
    pub average_duration_ms: u64,
    pub artists: FrequencyTable,
    /// Only filled when genres were requested.
    pub genres: Option<FrequencyTable>,
}

/// Floor of the mean duration; zero when there are no tracks.
pub fn average_duration_ms(tracks: &[Track]) -> u64 {
    if tracks.is_empty() {
        return 0;
    }
    let total: u64 = tracks.iter().map(|t| t.duration_ms).sum();
    total / tracks.len() as u64
}

/// Counts one appearance per artist per track.
pub fn artist_frequencies(tracks: &[Track]) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for track in tracks {
        for artist in &track.artists {
            table.add(&artist.name);
        }
    }
    table
}

/// Statistics over an already fetched snapshot, without genres.
pub fn summarize(tracks: &[Track], playlist_count: usize) -> PlaylistStats {
    PlaylistStats {
        playlist_count,
        total_tracks: tracks.len(),
        average_duration_ms: average_duration_ms(tracks),
        artists: artist_frequencies(tracks),
        genres: None,
    }
}

/// Counts genres over artist appearances.
///
/// Each distinct artist id is looked up once, in batches of at most
/// [`MAX_ARTISTS_PER_LOOKUP`]; every appearance of that artist on a track then
/// contributes each of its genres.
pub async fn genre_frequencies<A: PlaylistApi>(
    api: &A,
    tracks: &[Track],
) -> Result<FrequencyTable, PlaylistError> {
    let appearances: Vec<String> = tracks
        .iter()
        .flat_map(|t| t.artists.iter())
        .filter(|a| !a.id.is_empty())
        .map(|a| a.id.clone())
        .collect();
    let artist_ids = utils::unique_ids(&appearances);

    let mut genres_by_artist: HashMap<String, Vec<String>> = HashMap::new();
    for chunk in artist_ids.chunks(MAX_ARTISTS_PER_LOOKUP) {
        let artists = api
            .several_artists(chunk)
            .await
            .map_err(PlaylistError::remote("looking up artist genres"))?;
        for artist in artists {
            genres_by_artist.insert(artist.id, artist.genres);
        }
    }

    let mut table = FrequencyTable::new();
    for id in &appearances {
        if let Some(genres) = genres_by_artist.get(id) {
            for genre in genres {
                table.add(genre);
            }
        }
    }
    Ok(table)
}

/// Fetches the given playlists one after another and computes their stats.
///
/// Tracks are not deduplicated: a track present in two playlists counts twice.
pub async fn collect_stats<A: PlaylistApi>(
    api: &A,
    playlist_ids: &[String],
    with_genres: bool,
) -> Result<PlaylistStats, PlaylistError> {
    if playlist_ids.is_empty() {
        return Err(PlaylistError::Usage(
            "Select at least one playlist for statistics.".to_string(),
        ));
    }

    let mut all_tracks = Vec::new();
    for id in playlist_ids {
        let tracks = api
            .playlist_tracks(id)
            .await
            .map_err(PlaylistError::remote(format!("fetching tracks of {}", id)))?;
        all_tracks.extend(tracks);
    }

    let mut stats = summarize(&all_tracks, playlist_ids.len());
    if with_genres {
        stats.genres = Some(genre_frequencies(api, &all_tracks).await?);
    }
    Ok(stats)
}
