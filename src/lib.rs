//! Spotify Playlist Organizer CLI Library
//!
//! This library provides the building blocks of `sporgcli`: a Spotify Web API
//! client, the playlist utilities that run on top of it (duplicate detection
//! and removal, multi-playlist merge, aggregate statistics, search and sort)
//! and the command handlers that present them on the terminal.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `cli` - Command handlers invoked by the binary's dispatcher
//! - `config` - Configuration loaded from the environment and `.env`
//! - `management` - Durable local state (credential, selection set)
//! - `playlist` - Duplicate, merge, statistics and browse logic
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client and authorization flows
//! - `types` - Data structures and wire types
//! - `utils` - Small helpers (PKCE, formatting, parsing)
//!
//! # Example
//!
//! ```
//! use sporgcli::config;
//!
//! #[tokio::main]
//! async fn main() -> sporgcli::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     // Build a SpotifyClient and call playlist functions...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod playlist;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with `Send + Sync` bounds so it
/// can cross await points and task boundaries.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching playlists...");
/// info!("Found {} duplicates", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// success!("Added {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 right after printing, so it can be
/// used in any position that expects a diverging expression.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Selection file not found, starting with an empty selection");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
