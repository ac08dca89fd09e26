use std::{collections::HashSet, fmt, time::Duration};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{NaiveDate, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};
use url::Url;

use crate::{config::Config, types::Token};

pub const MERGED_PLAYLIST_DESCRIPTION: &str = "Merged with sporgcli";

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Builds the PKCE authorization URL the user is sent to.
pub fn build_authorize_url(config: &Config, code_challenge: &str) -> Result<String, String> {
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("code_challenge_method", "S256"),
            ("code_challenge", code_challenge),
            ("scope", config.scope.as_str()),
        ],
    )
    .map_err(|e| e.to_string())?;
    Ok(url.to_string())
}

/// Extracts an implicit-grant token from a callback URL or a bare fragment.
///
/// Accepts `http://host/callback#access_token=...&expires_in=3600`, the part
/// after `#`, or the same with a leading `#`. Returns `None` when no
/// `access_token` is present.
pub fn token_from_fragment(input: &str) -> Option<Token> {
    let input = input.trim();
    let fragment = match input.split_once('#') {
        Some((_, fragment)) => fragment,
        None => input,
    };

    let mut access_token = None;
    let mut expires_in = 3600;
    let mut scope = String::new();
    for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
        match key.as_ref() {
            "access_token" if !value.is_empty() => access_token = Some(value.into_owned()),
            "expires_in" => expires_in = value.parse().unwrap_or(3600),
            "scope" => scope = value.into_owned(),
            _ => {}
        }
    }

    Some(Token {
        access_token: access_token?,
        refresh_token: String::new(),
        scope,
        expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// Formats milliseconds as `m:ss`.
pub fn format_duration(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    format!("{}:{:02}", minutes, seconds)
}

pub fn merged_playlist_name(date: NaiveDate) -> String {
    format!("Merged Playlist {}", date.format("%Y-%m-%d"))
}

/// Removes repeated ids keeping the first occurrence.
pub fn unique_ids(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for id in ids {
        if seen.insert(id.as_str()) {
            unique.push(id.clone());
        }
    }
    unique
}

pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackSortKey {
    Name,
    Artist,
    Album,
    Duration,
}

impl TrackSortKey {
    pub const ALL: [TrackSortKey; 4] = [
        TrackSortKey::Name,
        TrackSortKey::Artist,
        TrackSortKey::Album,
        TrackSortKey::Duration,
    ];
}

impl fmt::Display for TrackSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrackSortKey::Name => "name",
            TrackSortKey::Artist => "artist",
            TrackSortKey::Album => "album",
            TrackSortKey::Duration => "duration",
        };
        f.write_str(s)
    }
}

pub fn parse_track_sort_key(input: &str) -> Result<TrackSortKey, String> {
    let normalized = input.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err("sort key cannot be empty".to_string());
    }
    TrackSortKey::ALL
        .into_iter()
        .find(|k| k.to_string() == normalized)
        .ok_or_else(|| {
            format!(
                "invalid value '{}' (expected one of: name, artist, album, duration)",
                input.trim()
            )
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistSortKey {
    Name,
    Tracks,
}

impl fmt::Display for PlaylistSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaylistSortKey::Name => f.write_str("name"),
            PlaylistSortKey::Tracks => f.write_str("tracks"),
        }
    }
}

pub fn parse_playlist_sort_key(input: &str) -> Result<PlaylistSortKey, String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "" => Err("sort key cannot be empty".to_string()),
        "name" => Ok(PlaylistSortKey::Name),
        "tracks" | "size" => Ok(PlaylistSortKey::Tracks),
        other => Err(format!(
            "invalid value '{}' (expected one of: name, tracks)",
            other
        )),
    }
}
