mod cache;
mod catalog;
mod config;
mod error;
mod logging;
mod matching;
mod normalize;
mod resolver;
mod spotify;
mod transfer;
mod youtube;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::cache::{CacheStore, JsonFileCache, MemoryCache};
use crate::catalog::{CredentialProvider, DestinationCatalog, SourceCatalog, StaticToken, Track};
use crate::config::Config;
use crate::error::TransferError;
use crate::matching::Snapshot;
use crate::transfer::{PlannedTrack, Transfer, TransferReport, TransferStatus};

#[derive(Parser)]
#[command(version, author, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to `tuneshift/config.toml` in the config directory)
    #[arg(long, global = true, env = "TUNESHIFT_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter (e.g. `info` or `tuneshift=debug`)
    #[arg(long, global = true, env = "RUST_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SpotifyArgs {
    /// Spotify app client ID
    #[arg(long, env = "SPOTIFY_CLIENT_ID")]
    spotify_client_id: Option<String>,

    /// Spotify app client secret
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    spotify_client_secret: Option<String>,
}

impl SpotifyArgs {
    /// Flags and environment take precedence over the config file
    fn client(self, config: &Config) -> Result<spotify::Client> {
        let configured = config.spotify.as_ref();
        let client_id = self
            .spotify_client_id
            .or_else(|| configured.map(|c| c.client_id.clone()));
        let client_secret = self
            .spotify_client_secret
            .or_else(|| configured.map(|c| c.client_secret.clone()));
        let (Some(client_id), Some(client_secret)) = (client_id, client_secret) else {
            bail!("missing Spotify client credentials");
        };
        spotify::Client::new(client_id, client_secret)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Prints the tracks of a Spotify playlist
    Analyze {
        #[command(flatten)]
        spotify: SpotifyArgs,

        /// Print the playlist as JSON
        #[arg(long)]
        json: bool,

        /// Spotify playlist link (e.g. `https://open.spotify.com/playlist/<id>`)
        url: String,
    },

    /// Copies a Spotify playlist into a private YouTube playlist
    Transfer {
        #[command(flatten)]
        spotify: SpotifyArgs,

        /// YouTube OAuth access token with the `youtube` scope
        #[arg(short = 'T', long, env = "YOUTUBE_ACCESS_TOKEN", hide_env_values = true)]
        access_token: Option<String>,

        /// Print what would happen using only the existing playlist and the cache
        #[arg(long)]
        dry_run: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Do not read or write the resolution cache
        #[arg(long, conflicts_with = "cache")]
        no_cache: bool,

        /// Cache file path
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Pause after each track that searched or inserted, in milliseconds
        #[arg(long)]
        track_delay_ms: Option<u64>,

        /// Overall time limit in seconds, 0 for none
        #[arg(long)]
        time_budget_secs: Option<u64>,

        /// Spotify playlist link
        url: String,
    },

    /// Lists cached track resolutions
    Cache {
        /// Cache file path
        #[arg(long)]
        cache: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// The shell to generate the completions for
        #[arg(value_enum)]
        shell: clap_complete_command::Shell,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { spotify, json, url } => {
            logging::init_tracing(&cli.log_level)?;
            let config = Config::load(cli.config.as_deref())?;
            let source = spotify.client(&config)?;
            let playlist = source.fetch_playlist(&url).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&playlist)?);
                return Ok(());
            }

            println!(
                "\"{}\" ({} tracks, {} listed)",
                playlist.title,
                playlist.tracks.len(),
                playlist.total_count,
            );
            if let Some(description) = &playlist.description {
                println!("{description}");
            }
            if let Some(cover_image) = &playlist.cover_image {
                println!("Cover: {cover_image}");
            }
            println!();
            for (i, track) in playlist.tracks.iter().enumerate() {
                println!(
                    "  #{} {} by {} ({})",
                    i + 1,
                    track.name,
                    track.artist,
                    track.album,
                );
            }
        }
        Commands::Transfer {
            spotify,
            access_token,
            dry_run,
            json,
            no_cache,
            cache,
            track_delay_ms,
            time_budget_secs,
            url,
        } => {
            logging::init_tracing(&cli.log_level)?;
            let config = Config::load(cli.config.as_deref())?;

            let mut options = config.transfer_options();
            if let Some(ms) = track_delay_ms {
                options.track_delay = Duration::from_millis(ms);
            }
            if let Some(secs) = time_budget_secs {
                options.time_budget = (secs > 0).then(|| Duration::from_secs(secs));
            }

            let source = spotify.client(&config)?;
            let credentials = StaticToken::new(access_token);
            let destination = youtube::Client::new(Box::new(credentials.clone()))?;

            let memory_cache;
            let json_cache;
            let cache: &dyn CacheStore = if no_cache {
                memory_cache = MemoryCache::new();
                &memory_cache
            } else {
                json_cache = JsonFileCache::new(cache.unwrap_or_else(|| config.cache_path()));
                tracing::info!(path = %json_cache.path().display(), "using cache");
                &json_cache
            };

            if dry_run {
                credentials.current_bearer_token()?;
                let playlist = source.fetch_playlist(&url).await?;
                let title = format!("{}{}", transfer::PLAYLIST_TITLE_PREFIX, playlist.title);
                let snapshot = match destination.find_playlist_by_title(&title).await? {
                    Some(existing) => {
                        let snapshot = transfer::load_snapshot(&destination, &existing.id).await;
                        if snapshot.is_empty() {
                            println!("Destination: \"{title}\" ({}, empty)", existing.id);
                        } else {
                            println!(
                                "Destination: \"{title}\" ({}, {} items)",
                                existing.id,
                                snapshot.len(),
                            );
                        }
                        snapshot
                    }
                    None => {
                        println!("Destination: \"{title}\" (would be created)");
                        Snapshot::default()
                    }
                };
                println!();

                let tracks: Vec<Track> = playlist.tracks.iter().map(|t| t.to_track()).collect();
                let planned = Transfer::new(&destination, cache, options)
                    .plan(snapshot, &tracks)
                    .await;
                for (i, (track, plan)) in tracks.iter().zip(&planned).enumerate() {
                    let action = match plan {
                        PlannedTrack::AlreadyExists => "already in playlist".to_owned(),
                        PlannedTrack::Cached(id) => format!("add cached {id}"),
                        PlannedTrack::NeedsSearch => "search".to_owned(),
                    };
                    println!("  #{} {} by {} \u{2192} {action}", i + 1, track.name, track.artist);
                }
                return Ok(());
            }

            match transfer::transfer_playlist(
                &credentials,
                &source,
                &destination,
                cache,
                &url,
                options,
            )
            .await
            {
                Ok(report) => print_report(&report, json)?,
                Err(err) => {
                    if let TransferError::TimedOut { report, .. } = &err {
                        print_report(report, json)?;
                    }
                    return Err(err.into());
                }
            }
        }
        Commands::Cache { cache } => {
            logging::init_tracing(&cli.log_level)?;
            let config = Config::load(cli.config.as_deref())?;
            let cache = JsonFileCache::new(cache.unwrap_or_else(|| config.cache_path()));
            let records = cache.records().await?;

            println!("{} ({} entries)", cache.path().display(), records.len());
            for record in &records {
                match &record.title {
                    Some(title) => println!(
                        "  {} \u{2192} {} ({title})",
                        record.signature, record.resolved_id,
                    ),
                    None => println!("  {} \u{2192} {}", record.signature, record.resolved_id),
                }
            }
        }
        Commands::Completions { shell } => {
            shell.generate(&mut Cli::command(), &mut std::io::stdout());
        }
    }
    Ok(())
}

fn print_report(report: &TransferReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("Playlist: {}", report.destination_playlist_id);
    for (i, result) in report.results.iter().enumerate() {
        println!("  #{} {} [{}]", i + 1, result.name, result.status);
    }
    println!();
    println!(
        "{} added, {} already present, {} not found, {} failed",
        report.count(TransferStatus::Success),
        report.count(TransferStatus::AlreadyExists),
        report.count(TransferStatus::NotFound),
        report.count(TransferStatus::Failed),
    );
    Ok(())
}
