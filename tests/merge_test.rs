mod common;

use chrono::NaiveDate;
use common::{Call, FakeApi, USER_ID, ids_of, tracks};
use sporgcli::{
    playlist::{PlaylistError, merge::merged_playlist_request, merge_playlists},
    types::Track,
    utils::MERGED_PLAYLIST_DESCRIPTION,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn numbered(prefix: &str, n: usize) -> Vec<Track> {
    let names: Vec<String> = (0..n).map(|i| format!("{}{}", prefix, i)).collect();
    let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
    tracks(&refs)
}

#[test]
fn test_merged_playlist_request() {
    let request = merged_playlist_request(date());
    assert_eq!(request.name, "Merged Playlist 2024-05-01");
    assert_eq!(request.description, MERGED_PLAYLIST_DESCRIPTION);
    assert!(!request.public);
    assert!(!request.collaborative);
}

#[tokio::test]
async fn test_merge_requires_two_playlists() {
    let api = FakeApi::with_playlists(&[("a", tracks(&["t1"]))]);

    for input in [ids(&[]), ids(&["a"]), ids(&["a", "a"])] {
        let err = merge_playlists(&api, &input, date()).await.unwrap_err();
        assert!(err.is_usage());
    }

    let err = merge_playlists(&api, &ids(&["a"]), date()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Select at least 2 playlists to merge (1 selected)."
    );
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_merge_dedups_across_sources() {
    let api = FakeApi::with_playlists(&[
        ("a", tracks(&["t1", "t2", "t1"])),
        ("b", tracks(&["t2", "t3"])),
    ]);

    let outcome = merge_playlists(&api, &ids(&["a", "b"]), date()).await.unwrap();

    assert_eq!(outcome.source_count, 2);
    assert_eq!(outcome.total_tracks, 5);
    assert_eq!(outcome.unique_tracks, 3);
    assert_eq!(outcome.batches, 1);
    assert_eq!(outcome.playlist.name, "Merged Playlist 2024-05-01");
    assert_eq!(ids_of(&api.contents(&outcome.playlist.id)), vec!["t1", "t2", "t3"]);

    assert_eq!(
        api.calls(),
        vec![
            Call::PlaylistTracks("a".to_string()),
            Call::PlaylistTracks("b".to_string()),
            Call::CurrentUser,
            Call::CreatePlaylist(USER_ID.to_string(), merged_playlist_request(date())),
            Call::AddTracks(
                "merged-1".to_string(),
                vec![
                    "spotify:track:t1".to_string(),
                    "spotify:track:t2".to_string(),
                    "spotify:track:t3".to_string()
                ]
            ),
        ]
    );
}

#[tokio::test]
async fn test_merge_without_overlap_keeps_every_track() {
    let api = FakeApi::with_playlists(&[("a", numbered("a", 3)), ("b", numbered("b", 4))]);

    let outcome = merge_playlists(&api, &ids(&["a", "b"]), date()).await.unwrap();

    assert_eq!(outcome.unique_tracks, outcome.total_tracks);
    assert_eq!(api.contents("merged-1").len(), 7);
}

#[tokio::test]
async fn test_merge_writes_in_batches_of_100() {
    let api = FakeApi::with_playlists(&[("a", numbered("a", 150)), ("b", numbered("b", 100))]);

    let outcome = merge_playlists(&api, &ids(&["a", "b"]), date()).await.unwrap();

    let batches = api.add_calls();
    assert_eq!(outcome.batches, 3);
    assert_eq!(
        batches.iter().map(|b| b.len()).collect::<Vec<_>>(),
        vec![100, 100, 50]
    );

    // Concatenated batches reproduce the deduplicated order
    let written: Vec<String> = batches.concat();
    let expected: Vec<String> = numbered("a", 150)
        .into_iter()
        .chain(numbered("b", 100))
        .map(|t| t.uri)
        .collect();
    assert_eq!(written, expected);
}

#[tokio::test]
async fn test_merge_exact_multiple_of_batch_size() {
    let api = FakeApi::with_playlists(&[("a", numbered("a", 100)), ("b", numbered("b", 100))]);

    let outcome = merge_playlists(&api, &ids(&["a", "b"]), date()).await.unwrap();

    assert_eq!(outcome.batches, 2);
    assert!(api.add_calls().iter().all(|b| b.len() == 100));
}

#[tokio::test]
async fn test_merge_of_empty_playlists_creates_empty_playlist() {
    let api = FakeApi::with_playlists(&[("a", Vec::new()), ("b", Vec::new())]);

    let outcome = merge_playlists(&api, &ids(&["a", "b"]), date()).await.unwrap();

    assert_eq!(outcome.unique_tracks, 0);
    assert_eq!(outcome.batches, 0);
    assert!(api.add_calls().is_empty());
    assert!(api.contents("merged-1").is_empty());
}

#[tokio::test]
async fn test_merge_fetch_failure_creates_nothing() {
    let mut api = FakeApi::with_playlists(&[("a", tracks(&["t1"])), ("b", tracks(&["t2"]))]);
    api.fail_tracks_for = Some("b".to_string());

    let err = merge_playlists(&api, &ids(&["a", "b"]), date()).await.unwrap_err();

    assert!(matches!(err, PlaylistError::Remote { .. }));
    assert!(
        !api.calls()
            .iter()
            .any(|c| matches!(c, Call::CreatePlaylist(..)))
    );
}

#[tokio::test]
async fn test_merge_create_failure_writes_nothing() {
    let mut api = FakeApi::with_playlists(&[("a", tracks(&["t1"])), ("b", tracks(&["t2"]))]);
    api.fail_create = true;

    let err = merge_playlists(&api, &ids(&["a", "b"]), date()).await.unwrap_err();

    assert!(matches!(err, PlaylistError::Remote { .. }));
    assert!(err.to_string().contains("creating merged playlist"));
    assert!(api.add_calls().is_empty());
}

#[tokio::test]
async fn test_merge_failed_batch_leaves_partial_playlist() {
    let mut api = FakeApi::with_playlists(&[("a", numbered("a", 150)), ("b", numbered("b", 10))]);
    api.fail_add_call = Some(2);

    let err = merge_playlists(&api, &ids(&["a", "b"]), date()).await.unwrap_err();

    assert!(err.to_string().contains("batch 2"));
    assert_eq!(api.add_calls().len(), 2);
    assert_eq!(api.contents("merged-1").len(), 100);
}

#[tokio::test]
async fn test_merge_rejected_token() {
    let mut api = FakeApi::with_playlists(&[("a", tracks(&["t1"])), ("b", tracks(&["t2"]))]);
    api.reject_token = true;

    let err = merge_playlists(&api, &ids(&["a", "b"]), date()).await.unwrap_err();
    assert!(matches!(err, PlaylistError::Unauthorized));
}
