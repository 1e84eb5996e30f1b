use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotalyze::{cli, config, error, warning};

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
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search and inspect artists
    Artist(ArtistOptions),

    /// Search tracks and analyze audio features
    Track(TrackOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Search and inspect artists")]
pub struct ArtistOptions {
    /// Search for artist suggestions
    #[clap(long, conflicts_with = "name")]
    pub search: Option<String>,

    /// Artist name to resolve exactly
    pub name: Option<String>,

    /// Also fetch the artist's top tracks
    #[clap(long, requires = "name")]
    pub top_tracks: bool,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Search tracks and analyze audio features")]
pub struct TrackOptions {
    /// Search for track candidates
    #[clap(long)]
    pub search: Option<String>,

    /// Analyze the n-th candidate of the search (1-based)
    #[clap(long, requires = "search")]
    pub pick: Option<usize>,

    /// Analyze a track by its Spotify ID
    #[clap(long, conflicts_with_all = ["search", "pick"])]
    pub analyze: Option<String>,
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

    match cli.command {
        Command::Artist(opt) => match (opt.search, opt.name) {
            (Some(query), _) => cli::search_artists(query).await,
            (None, Some(name)) => cli::show_artist(name, opt.top_tracks).await,
            (None, None) => {
                warning!("Provide an artist name or --search <QUERY>.");
            }
        },

        Command::Track(opt) => match (opt.search, opt.analyze) {
            (Some(query), _) => cli::search_tracks(query, opt.pick).await,
            (None, Some(track_id)) => cli::analyze_track(track_id).await,
            (None, None) => {
                warning!("Provide --search <QUERY> or --analyze <TRACK_ID>.");
            }
        },

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
