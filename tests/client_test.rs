use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use sporgcli::{
    config::Config,
    management::TokenManager,
    spotify::{ApiError, SpotifyClient},
    types::Token,
};
use tempfile::TempDir;
use tokio::net::TcpListener;

async fn bind() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

fn serve(listener: TcpListener, app: Router) {
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
}

// Client pointed at the stub, holding a token that is valid for an hour
fn client_for(addr: SocketAddr, dir: &TempDir) -> SpotifyClient {
    let api_url = format!("http://{}", addr);
    let config = Config::from_lookup(move |key| match key {
        "SPOTIFY_API_AUTH_CLIENT_ID" => Some("client-123".to_string()),
        "SPOTIFY_API_URL" => Some(api_url.clone()),
        _ => None,
    })
    .unwrap();

    let token = Token {
        access_token: "access-abc".to_string(),
        refresh_token: String::new(),
        scope: String::new(),
        expires_in: 3600,
        obtained_at: chrono::Utc::now().timestamp() as u64,
    };
    let tokens = TokenManager::with_path(token, dir.path().join("token.json"));
    SpotifyClient::new(config, tokens)
}

fn playlist_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Playlist {}", id),
        "description": null,
        "owner": {"id": "user-1", "display_name": "User"},
        "public": false,
        "tracks": {"href": "", "total": 1}
    })
}

fn track_json(id: &str) -> Value {
    json!({"track": {
        "id": id,
        "name": format!("Track {}", id),
        "uri": format!("spotify:track:{}", id),
        "duration_ms": 1000,
        "artists": [{"id": "a1", "name": "Artist"}],
        "album": {"name": "Album"}
    }})
}

fn offset(params: &HashMap<String, String>) -> usize {
    params
        .get("offset")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

#[tokio::test]
async fn test_user_playlists_follow_next_links() {
    let (listener, addr) = bind().await;
    let app = Router::new().route(
        "/me/playlists",
        get(move |Query(params): Query<HashMap<String, String>>| async move {
            if offset(&params) == 0 {
                Json(json!({
                    "items": [playlist_json("p1"), playlist_json("p2")],
                    "next": format!("http://{}/me/playlists?offset=2&limit=50", addr),
                    "total": 3
                }))
            } else {
                Json(json!({"items": [playlist_json("p3")], "next": null, "total": 3}))
            }
        }),
    );
    serve(listener, app);

    let dir = tempfile::tempdir().unwrap();
    let playlists = client_for(addr, &dir).get_user_playlists().await.unwrap();

    let ids: Vec<&str> = playlists.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3"]);
}

#[tokio::test]
async fn test_playlist_tracks_follow_next_links_and_skip_removed() {
    let (listener, addr) = bind().await;
    let app = Router::new().route(
        "/playlists/{id}/tracks",
        get(move |Query(params): Query<HashMap<String, String>>| async move {
            if offset(&params) == 0 {
                Json(json!({
                    "items": [track_json("t1"), {"track": null}],
                    "next": format!("http://{}/playlists/p1/tracks?offset=2&limit=100", addr),
                    "total": 3
                }))
            } else {
                Json(json!({"items": [track_json("t2")], "next": null, "total": 3}))
            }
        }),
    );
    serve(listener, app);

    let dir = tempfile::tempdir().unwrap();
    let tracks = client_for(addr, &dir).get_playlist_tracks("p1").await.unwrap();

    let ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t2"]);
}

#[tokio::test]
async fn test_rejected_token_is_unauthorized() {
    let (listener, addr) = bind().await;
    let app = Router::new().route(
        "/me",
        get(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": {"status": 401, "message": "The access token expired"}})),
            )
        }),
    );
    serve(listener, app);

    let dir = tempfile::tempdir().unwrap();
    let err = client_for(addr, &dir).get_current_user().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn test_rate_limited_request_is_retried() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let (listener, addr) = bind().await;
    let app = Router::new().route(
        "/me",
        get(move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    return (StatusCode::TOO_MANY_REQUESTS, [("retry-after", "0")]).into_response();
                }
                Json(json!({"id": "user-1", "display_name": "User", "email": null})).into_response()
            }
        }),
    );
    serve(listener, app);

    let dir = tempfile::tempdir().unwrap();
    let user = client_for(addr, &dir).get_current_user().await.unwrap();

    assert_eq!(user.id, "user-1");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_rate_limit_gives_up_after_three_retries() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let (listener, addr) = bind().await;
    let app = Router::new().route(
        "/me",
        get(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async {
                let response: Response = (
                    StatusCode::TOO_MANY_REQUESTS,
                    [("retry-after", "0")],
                    Json(json!({"error": {"status": 429, "message": "API rate limit exceeded"}})),
                )
                    .into_response();
                response
            }
        }),
    );
    serve(listener, app);

    let dir = tempfile::tempdir().unwrap();
    let err = client_for(addr, &dir).get_current_user().await.unwrap_err();

    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status.as_u16(), 429);
            assert_eq!(message, "API rate limit exceeded");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(hits.load(Ordering::SeqCst), 4);
}
