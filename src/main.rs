mod apple_library;
mod import;
mod matching;
mod normalize;
mod plex;
mod resolver;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Result, ensure};
use clap::{CommandFactory, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, author, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recreates the playlists of an Apple Music library export on a Plex server
    Import {
        /// Path to the exported `Library.xml`
        apple_xml: PathBuf,

        /// plex.tv account user name (the one used on plex.tv, not a server user)
        #[arg(short = 'u', long, env = "PLEX_USER")]
        user: Option<String>,

        /// plex.tv account password
        #[arg(short = 'p', long, env = "PLEX_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Plex token, used instead of signing in with user and password
        #[arg(short = 't', long, env = "PLEX_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Name of the Plex server to create playlists on
        #[arg(short = 'S', long, env = "PLEX_SERVER")]
        server: Option<String>,

        /// Title of the music library on the server
        #[arg(long, default_value = "Music")]
        section: String,

        /// Comma-delimited names of the playlists to import (all playlists when omitted)
        #[arg(short = 'l', long)]
        limit: Option<String>,

        /// Number of tracks fetched per request
        #[arg(long, default_value_t = 500)]
        page_size: u32,

        /// Print the resolved playlists and do not create them
        #[arg(long)]
        dry_run: bool,

        /// Debug output, reports unmatched tracks and turns off the progress bar
        #[arg(long)]
        debug: bool,
    },

    /// Generate shell completions
    Completions {
        /// The shell to generate the completions for
        #[arg(value_enum)]
        shell: clap_complete_command::Shell,
    },
}

fn init_tracing(debug: bool) {
    let default_directive = if debug {
        concat!(env!("CARGO_CRATE_NAME"), "=debug,info")
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_owned())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            apple_xml,
            user,
            password,
            token,
            server,
            section,
            limit,
            page_size,
            dry_run,
            debug,
        } => {
            init_tracing(debug);
            let started = Instant::now();

            let server_name = match server {
                Some(server) => server,
                None => prompt("Plex server name: ")?,
            };
            ensure!(
                plex::validate_server_name(&server_name),
                "invalid server name",
            );

            info!("reading {}", apple_xml.display());
            let library = apple_library::read_library(&apple_xml)?;
            let selected = limit.as_deref().map(apple_library::parse_playlist_filter);
            let playlists = library.playlists(selected.as_deref())?;
            ensure!(!playlists.is_empty(), "no playlists to import");
            info!(
                playlists = playlists.len(),
                tracks = library.track_count(),
                "read Apple Music library",
            );

            let account = match token {
                Some(token) => plex::Account::from_token(token)?,
                None => {
                    let user = match user {
                        Some(user) => user,
                        None => prompt("Plex account user name: ")?,
                    };
                    let password = match password {
                        Some(password) => password,
                        None => rpassword::prompt_password("Plex account password: ")?,
                    };
                    plex::Account::sign_in(&user, &password).await?
                }
            };
            let server = account.connect(&server_name).await?;
            let section_key = server.music_section(&section).await?;
            let catalog = server.all_tracks(&section_key, page_size).await?;
            info!(tracks = catalog.len(), "fetched Plex library");

            let mut context = resolver::ResolveContext::new(debug);
            let summary = if dry_run {
                import::import_playlists(&playlists, &catalog, &import::DryRunSink, &mut context)
                    .await
            } else {
                import::import_playlists(&playlists, &catalog, &server, &mut context).await
            };

            let stats = context.stats();
            info!(
                source_tracks = summary.source_tracks,
                resolved_tracks = summary.resolved_tracks,
                cached = context.cache().len(),
                cache_hits = stats.cache_hits,
                scans = stats.scans,
                ambiguous = stats.ambiguous,
                name_only = stats.dropped_name_only,
                unmatched = stats.dropped_no_match,
                "matching finished",
            );
            if summary.failed > 0 && !debug {
                info!(
                    "{} playlists were not created, rerun with --debug for details",
                    summary.failed,
                );
            }
            info!(
                "Done. Created {} playlists on {} in {} seconds.",
                summary.created,
                server.name(),
                started.elapsed().as_secs(),
            );
        }
        Commands::Completions { shell } => {
            shell.generate(&mut Cli::command(), &mut io::stdout());
        }
    }
    Ok(())
}
