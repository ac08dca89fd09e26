use tabled::Table;

use crate::{
    error, info,
    management::SelectionManager,
    spotify::PlaylistApi,
    success,
    types::{Playlist, PlaylistTableRow},
    utils, warning,
};

/// Shows the selected playlists.
///
/// Names and track counts are resolved from the user's playlists when a
/// client is available; otherwise only the ids are listed.
pub async fn list_selection<A: PlaylistApi>(api: Option<&A>, selection: &SelectionManager) {
    if selection.is_empty() {
        info!("No playlists selected. Use sporgcli select add <ID>...");
        return;
    }

    let playlists = match api {
        Some(api) => {
            let pb = utils::spinner("Fetching playlists...");
            let result = api.user_playlists().await;
            pb.finish_and_clear();

            match result {
                Ok(playlists) => playlists,
                Err(e) => {
                    warning!("Failed to resolve playlist names. Err: {}", e);
                    Vec::new()
                }
            }
        }
        None => {
            info!("Not logged in, showing ids only.");
            Vec::new()
        }
    };

    println!("{}", Table::new(selection_rows(selection, &playlists)));
}

/// One row per selected id, in selection order.
pub fn selection_rows(selection: &SelectionManager, playlists: &[Playlist]) -> Vec<PlaylistTableRow> {
    selection
        .ids()
        .iter()
        .map(|id| match playlists.iter().find(|p| &p.id == id) {
            Some(p) => PlaylistTableRow {
                selected: "*".to_string(),
                id: p.id.clone(),
                name: p.name.clone(),
                tracks: p.track_count(),
                owner: p.owner.display_name.clone().unwrap_or(p.owner.id.clone()),
            },
            None => PlaylistTableRow {
                selected: "*".to_string(),
                id: id.clone(),
                name: "(unknown)".to_string(),
                tracks: 0,
                owner: String::new(),
            },
        })
        .collect()
}

pub async fn select_add(selection: &mut SelectionManager, ids: Vec<String>) {
    for id in &ids {
        if selection.add(id) {
            success!("Selected {}", id);
        } else {
            info!("{} is already selected", id);
        }
    }
    save(selection).await;
}

pub async fn select_remove(selection: &mut SelectionManager, ids: Vec<String>) {
    for id in &ids {
        if selection.remove(id) {
            success!("Deselected {}", id);
        } else {
            info!("{} was not selected", id);
        }
    }
    save(selection).await;
}

pub async fn select_toggle(selection: &mut SelectionManager, ids: Vec<String>) {
    for id in &ids {
        if selection.toggle(id) {
            success!("Selected {}", id);
        } else {
            success!("Deselected {}", id);
        }
    }
    save(selection).await;
}

pub async fn select_clear(selection: &mut SelectionManager) {
    match selection.clear().await {
        Ok(()) => success!("Selection cleared."),
        Err(e) => error!("Failed to clear selection. Err: {}", e),
    }
}

async fn save(selection: &SelectionManager) {
    if let Err(e) = selection.persist().await {
        error!("Failed to save selection. Err: {}", e);
    }
    info!("{} playlists selected.", selection.len());
}
