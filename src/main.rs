use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sporgcli::{cli, config, error, utils};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth(AuthOptions),

    /// List your playlists
    Playlists(PlaylistsOptions),

    /// List the tracks of a playlist
    Tracks(TracksOptions),

    /// Find or remove duplicate tracks in a playlist
    Duplicates(DuplicatesOptions),

    /// Manage the playlists selected for merge and stats
    Select(SelectOptions),

    #[clap(about = "Merge playlists into a new playlist without duplicates")]
    Merge(MergeOptions),

    /// Statistics over several playlists
    Stats(StatsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Authorize with Spotify API",
    args_conflicts_with_subcommands = true
)]
pub struct AuthOptions {
    /// Use the access token from a pasted implicit-grant callback URL
    #[clap(long)]
    pub from_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<AuthSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AuthSubcommand {
    /// Show token expiry and the logged in user
    Status,
    /// Remove the stored credential
    Logout,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    /// Only show playlists whose name contains this text
    #[clap(long)]
    pub search: Option<String>,

    /// Sort by name or tracks
    #[clap(long, value_parser = utils::parse_playlist_sort_key)]
    pub sort: Option<utils::PlaylistSortKey>,

    /// Reverse the sort order
    #[clap(long, action = ArgAction::SetTrue)]
    pub reverse: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TracksOptions {
    /// Playlist id
    pub playlist_id: String,

    /// Only show tracks whose name, artist or album contains this text
    #[clap(long)]
    pub search: Option<String>,

    /// Sort by name, artist, album or duration
    #[clap(long, value_parser = utils::parse_track_sort_key)]
    pub sort: Option<utils::TrackSortKey>,

    /// Reverse the sort order
    #[clap(long, action = ArgAction::SetTrue)]
    pub reverse: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DuplicatesOptions {
    /// Playlist id
    pub playlist_id: String,

    /// Remove the duplicates from the playlist
    #[clap(long)]
    pub remove: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SelectOptions {
    /// Subcommands under `select`; without one the selection is listed
    #[command(subcommand)]
    pub command: Option<SelectSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SelectSubcommand {
    /// Add playlists to the selection
    Add {
        #[clap(required = true)]
        ids: Vec<String>,
    },
    /// Remove playlists from the selection
    Remove {
        #[clap(required = true)]
        ids: Vec<String>,
    },
    /// Flip selection of playlists
    Toggle {
        #[clap(required = true)]
        ids: Vec<String>,
    },
    /// Empty the selection
    Clear,
}

#[derive(Parser, Debug, Clone)]
pub struct MergeOptions {
    /// Playlist to merge; can be repeated. Defaults to the selection
    #[clap(long = "playlist", action = ArgAction::Append, num_args = 1)]
    pub playlists: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct StatsOptions {
    /// Playlist to include; can be repeated. Defaults to the selection
    #[clap(long = "playlist", action = ArgAction::Append, num_args = 1)]
    pub playlists: Vec<String>,

    /// Number of entries in the top lists
    #[clap(long)]
    pub top: Option<usize>,

    /// Also count genres (extra artist lookups)
    #[clap(long)]
    pub genres: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    match cli.command {
        Command::Auth(opt) => match opt.command {
            Some(AuthSubcommand::Status) => cli::auth_status(load_config()).await,
            Some(AuthSubcommand::Logout) => cli::logout().await,
            None => cli::auth(&load_config(), opt.from_url).await,
        },

        Command::Select(opt) => {
            let mut selection = cli::load_selection().await;
            match opt.command {
                Some(SelectSubcommand::Add { ids }) => cli::select_add(&mut selection, ids).await,
                Some(SelectSubcommand::Remove { ids }) => {
                    cli::select_remove(&mut selection, ids).await
                }
                Some(SelectSubcommand::Toggle { ids }) => {
                    cli::select_toggle(&mut selection, ids).await
                }
                Some(SelectSubcommand::Clear) => cli::select_clear(&mut selection).await,
                None => {
                    let client = match config::Config::from_env() {
                        Ok(config) => cli::try_connect(config).await,
                        Err(_) => None,
                    };
                    cli::list_selection(client.as_ref(), &selection).await
                }
            }
        }

        Command::Playlists(opt) => {
            let client = cli::connect(load_config()).await;
            cli::list_playlists(&client, opt.search, opt.sort, opt.reverse).await
        }

        Command::Tracks(opt) => {
            let client = cli::connect(load_config()).await;
            cli::list_tracks(&client, &opt.playlist_id, opt.search, opt.sort, opt.reverse).await
        }

        Command::Duplicates(opt) => {
            let client = cli::connect(load_config()).await;
            cli::duplicates(&client, &opt.playlist_id, opt.remove).await
        }

        Command::Merge(opt) => {
            let client = cli::connect(load_config()).await;
            let mut selection = cli::load_selection().await;
            cli::merge(&client, &mut selection, opt.playlists).await
        }

        Command::Stats(opt) => {
            let client = cli::connect(load_config()).await;
            let selection = cli::load_selection().await;
            cli::stats(&client, &selection, opt.playlists, opt.top, opt.genres).await
        }

        Command::Completions(_) => {}
    }
}

fn load_config() -> config::Config {
    match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    }
}
