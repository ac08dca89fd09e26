use tabled::Table;

use crate::{
    info,
    management::SelectionManager,
    playlist::{self, FrequencyTable},
    spotify::PlaylistApi,
    types::FrequencyTableRow,
    utils,
};

use super::report;

pub const DEFAULT_TOP: usize = 5;

/// Prints totals, average duration and the top artists (and genres).
pub async fn stats<A: PlaylistApi>(
    api: &A,
    selection: &SelectionManager,
    playlist_ids: Vec<String>,
    top: Option<usize>,
    genres: bool,
) {
    let ids = if playlist_ids.is_empty() {
        selection.ids().to_vec()
    } else {
        playlist_ids
    };

    let pb = utils::spinner("Collecting playlist statistics...");
    let result = playlist::collect_stats(api, &ids, genres).await;
    pb.finish_and_clear();

    let stats = match result {
        Ok(stats) => stats,
        Err(e) => report(e),
    };
    let top = top.unwrap_or(DEFAULT_TOP);

    info!("Total playlists: {}", stats.playlist_count);
    info!("Total tracks: {}", stats.total_tracks);
    info!(
        "Average track duration: {}",
        utils::format_duration(stats.average_duration_ms)
    );

    print_top("Top artists", &stats.artists, top);
    if let Some(genre_table) = &stats.genres {
        print_top("Top genres", genre_table, top);
    }
}

fn print_top(title: &str, table: &FrequencyTable, n: usize) {
    if table.is_empty() {
        info!("{}: none", title);
        return;
    }

    let rows: Vec<FrequencyTableRow> = table
        .top(n)
        .into_iter()
        .map(|(name, count)| FrequencyTableRow { name, count })
        .collect();
    println!("{}\n{}", title, Table::new(rows));
}
