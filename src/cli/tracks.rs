use tabled::Table;

use crate::{
    info,
    playlist::{PlaylistError, browse},
    spotify::PlaylistApi,
    types::{Track, TrackTableRow},
    utils::{self, TrackSortKey},
};

use super::report;

pub async fn list_tracks<A: PlaylistApi>(
    api: &A,
    playlist_id: &str,
    search: Option<String>,
    sort: Option<TrackSortKey>,
    reverse: bool,
) {
    let pb = utils::spinner("Fetching tracks...");
    let result = api.playlist_tracks(playlist_id).await;
    pb.finish_and_clear();

    let mut tracks = match result {
        Ok(tracks) => tracks,
        Err(e) => report(PlaylistError::remote(format!(
            "fetching tracks of {}",
            playlist_id
        ))(e)),
    };

    if let Some(query) = search {
        tracks = browse::search_tracks(&tracks, &query);
    }
    if let Some(key) = sort {
        browse::sort_tracks(&mut tracks, key, reverse);
    }

    if tracks.is_empty() {
        info!("No tracks found.");
        return;
    }

    println!("{}", track_table(tracks.iter().enumerate()));
}

/// Renders `(index, track)` pairs; the `#` column shows `index + 1`.
pub(crate) fn track_table<'a>(rows: impl IntoIterator<Item = (usize, &'a Track)>) -> Table {
    let rows: Vec<TrackTableRow> = rows
        .into_iter()
        .map(|(i, t)| TrackTableRow {
            position: i + 1,
            name: t.name.clone(),
            artists: t.artist_names(),
            album: t.album.name.clone(),
            duration: utils::format_duration(t.duration_ms),
        })
        .collect();
    Table::new(rows)
}
