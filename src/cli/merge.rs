use chrono::Local;

use crate::{
    info, management::SelectionManager, playlist, spotify::PlaylistApi, success, utils, warning,
};

use super::report;

/// Merges the given playlists, or the selection when none are given.
///
/// The selection is cleared only after a successful merge of the selection.
pub async fn merge<A: PlaylistApi>(
    api: &A,
    selection: &mut SelectionManager,
    playlist_ids: Vec<String>,
) {
    let use_selection = playlist_ids.is_empty();
    let ids = if use_selection {
        selection.ids().to_vec()
    } else {
        playlist_ids
    };

    info!("Merging {} playlists...", ids.len());
    let pb = utils::spinner("Fetching tracks and writing merged playlist...");
    let result = playlist::merge_playlists(api, &ids, Local::now().date_naive()).await;
    pb.finish_and_clear();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => report(e),
    };

    success!(
        "Created \"{}\" ({}) with {} unique tracks out of {} from {} playlists in {} batches.",
        outcome.playlist.name,
        outcome.playlist.id,
        outcome.unique_tracks,
        outcome.total_tracks,
        outcome.source_count,
        outcome.batches
    );

    if use_selection {
        if let Err(e) = selection.clear().await {
            warning!("Failed to clear selection. Err: {}", e);
        }
    }
}
