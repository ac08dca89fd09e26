//! # Playlist Utilities
//!
//! Client-side operations over track collections fetched through a
//! [`crate::spotify::PlaylistApi`]:
//!
//! - [`duplicates`] - find repeated track ids and remove them remotely
//! - [`merge`] - combine several playlists into a new deduplicated one
//! - [`stats`] - totals, average duration, artist and genre frequencies
//! - [`browse`] - search and sort for listings
//!
//! Duplicate status is always decided by the track's catalog id, with the
//! first occurrence in fetch order kept. Statistics deliberately do not
//! deduplicate. Nothing here prints; the command handlers in [`crate::cli`]
//! turn results and [`PlaylistError`]s into terminal output.

pub mod browse;
pub mod duplicates;
mod error;
pub mod merge;
pub mod stats;

pub use duplicates::{
    RemovalOutcome, dedup_tracks, duplicate_positions, find_duplicates, remove_duplicates,
};
pub use error::PlaylistError;
pub use merge::{MergeOutcome, merge_playlists};
pub use stats::{FrequencyTable, PlaylistStats, collect_stats};
