//! hn-threads main entry point
//!
//! This is the command-line interface for the hn-threads reader.

use anyhow::Context;
use clap::{Parser, Subcommand};
use hn_threads::config::{load_config_with_hash, Config, MAX_LISTING_LIMIT};
use hn_threads::render::format_listing;
use hn_threads::{Engine, ItemId, ListingKind};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// hn-threads: read Hacker News from the terminal
///
/// Without a command, prints the top stories. `comments <ID>` prints a story
/// (or comment) with its whole reply tree, loaded concurrently.
#[derive(Parser, Debug)]
#[command(name = "hn-threads")]
#[command(version)]
#[command(about = "Read Hacker News listings and comment threads", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a numbered listing of stories
    List {
        /// Which listing to read (defaults to the configured one)
        #[arg(long, value_enum)]
        kind: Option<ListingKind>,

        /// Number of stories to show (defaults to the configured limit)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..=MAX_LISTING_LIMIT as u64))]
        limit: Option<u64>,
    },

    /// Print an item and its full comment tree
    Comments {
        /// Item id of the story or comment
        id: ItemId,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("load config {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let engine = Engine::from_config(&config).context("build item source")?;
    spawn_interrupt_handler(&engine);

    match cli.command {
        Some(Command::Comments { id }) => handle_comments(&engine, id).await,
        Some(Command::List { kind, limit }) => {
            let kind = kind.unwrap_or(config.listing.kind);
            let limit = limit.map_or(config.listing.limit, |l| l as usize);
            handle_list(&engine, kind, limit).await
        }
        None => handle_list(&engine, config.listing.kind, config.listing.limit).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only rendered output.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hn_threads=warn,warn"),
            1 => EnvFilter::new("hn_threads=info,warn"),
            2 => EnvFilter::new("hn_threads=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Cancels all in-flight fetches on Ctrl-C
fn spawn_interrupt_handler(engine: &Engine) {
    let cancel = engine.cancellation_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling outstanding fetches");
            cancel.cancel();
        }
    });
}

/// Handles the listing view
async fn handle_list(engine: &Engine, kind: ListingKind, limit: usize) -> anyhow::Result<()> {
    let items = engine
        .load_listing(kind, limit)
        .await
        .with_context(|| format!("load {} stories", kind))?;

    print!("{}", format_listing(&items));
    Ok(())
}

/// Handles the comment tree view
async fn handle_comments(engine: &Engine, id: ItemId) -> anyhow::Result<()> {
    let rendered = engine
        .render_tree(id)
        .await
        .with_context(|| format!("load comments for item {}", id))?;

    println!("{}", rendered);
    Ok(())
}
