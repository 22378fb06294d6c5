use clap::{Parser, Subcommand};

mod cli;
mod config;
mod core;
mod error;
mod utils;

use cli::*;
use config::Config;
use error::Result;

#[derive(Parser)]
#[command(name = "ytmbridge")]
#[command(about = "Command-line bridge to the YouTube Music metadata API and yt-dlp")]
#[command(version)]
#[command(author = "musicdock")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search tracks, albums, artists and videos, merged round-robin
    Search(search::SearchArgs),

    /// Fetch lyrics for a video id or a lyrics id
    Lyrics(lyrics::LyricsArgs),

    /// Extract subtitle tracks for a video
    Subtitles(subtitles::SubtitlesArgs),

    /// Stream audio or video content to stdout
    Content(content::ContentArgs),

    /// Look up a track and its play context
    #[command(alias = "video")]
    Track(track::TrackArgs),

    /// Look up an album by browse id
    Album(album::AlbumArgs),

    /// Look up an artist by channel id
    Artist(artist::ArtistArgs),

    /// Look up a playlist by id
    Playlist(playlist::PlaylistArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    utils::logging::init_logging(cli.verbose).map_err(error::BridgeError::Internal)?;

    let config = Config::load(cli.config.as_deref()).map_err(error::BridgeError::Internal)?;

    match cli.command {
        Commands::Search(args) => search::execute(args, &config).await,
        Commands::Lyrics(args) => lyrics::execute(args, &config).await,
        Commands::Subtitles(args) => subtitles::execute(args, &config).await,
        Commands::Content(args) => content::execute(args, &config).await,
        Commands::Track(args) => track::execute(args, &config).await,
        Commands::Album(args) => album::execute(args, &config).await,
        Commands::Artist(args) => artist::execute(args, &config).await,
        Commands::Playlist(args) => playlist::execute(args, &config).await,
    }
}
