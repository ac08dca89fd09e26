use crate::{
    info,
    playlist::{self, PlaylistError, RemovalOutcome},
    spotify::PlaylistApi,
    success, utils,
};

use super::{report, tracks::track_table};

/// Lists duplicate tracks of a playlist, or removes them when `remove` is set.
pub async fn duplicates<A: PlaylistApi>(api: &A, playlist_id: &str, remove: bool) {
    if remove {
        let pb = utils::spinner("Removing duplicates...");
        let result = playlist::remove_duplicates(api, playlist_id).await;
        pb.finish_and_clear();

        match result {
            Ok(RemovalOutcome::NothingToDo) => success!("No duplicates found, nothing to do."),
            Ok(RemovalOutcome::Removed {
                duplicates,
                refreshed,
            }) => {
                success!("Removed {} duplicate tracks.", duplicates.len());
                info!("Playlist now holds {} tracks.", refreshed.len());
            }
            Err(e) => report(e),
        }
        return;
    }

    let pb = utils::spinner("Fetching tracks...");
    let result = api.playlist_tracks(playlist_id).await;
    pb.finish_and_clear();

    let tracks = match result {
        Ok(tracks) => tracks,
        Err(e) => report(PlaylistError::remote(format!(
            "fetching tracks of {}",
            playlist_id
        ))(e)),
    };

    let positions = playlist::duplicate_positions(&tracks);
    if positions.is_empty() {
        success!("No duplicates in {} tracks.", tracks.len());
        return;
    }

    info!(
        "Found {} duplicates in {} tracks:",
        positions.len(),
        tracks.len()
    );
    println!(
        "{}",
        track_table(positions.iter().map(|&i| (i, &tracks[i])))
    );
    info!("Run again with --remove to delete them.");
}
