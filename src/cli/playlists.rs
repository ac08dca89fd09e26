use tabled::Table;

use crate::{
    info,
    playlist::{PlaylistError, browse},
    spotify::PlaylistApi,
    types::PlaylistTableRow,
    utils::{self, PlaylistSortKey},
};

use super::{load_selection, report};

pub async fn list_playlists<A: PlaylistApi>(
    api: &A,
    search: Option<String>,
    sort: Option<PlaylistSortKey>,
    reverse: bool,
) {
    let pb = utils::spinner("Fetching playlists...");
    let result = api.user_playlists().await;
    pb.finish_and_clear();

    let mut playlists = match result {
        Ok(playlists) => playlists,
        Err(e) => report(PlaylistError::remote("fetching playlists")(e)),
    };

    if let Some(query) = search {
        playlists = browse::search_playlists(&playlists, &query);
    }
    if let Some(key) = sort {
        browse::sort_playlists(&mut playlists, key, reverse);
    }

    if playlists.is_empty() {
        info!("No playlists found.");
        return;
    }

    let selection = load_selection().await;
    let table_rows: Vec<PlaylistTableRow> = playlists
        .into_iter()
        .map(|p| PlaylistTableRow {
            selected: if selection.contains(&p.id) { "*" } else { "" }.to_string(),
            tracks: p.track_count(),
            owner: p.owner.display_name.clone().unwrap_or(p.owner.id.clone()),
            id: p.id,
            name: p.name,
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);
}
