//! Noun-Harvest main entry point
//!
//! This is the command-line interface for crawling the noun list and for
//! building the prefix tree from it.

use anyhow::Context;
use clap::{Parser, Subcommand};
use noun_harvest::config::{load_config_with_hash, Config, LoggingConfig};
use noun_harvest::crawler::run_crawl;
use noun_harvest::trie::build_trie_file;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Noun-Harvest: collects confirmed nouns from an online dictionary
///
/// `crawl` walks the dictionary index letter by letter, filters every entry,
/// confirms nouns against a second dictionary, and writes the word list.
/// `build-trie` turns a word list into a JSON prefix tree.
#[derive(Parser, Debug)]
#[command(name = "noun-harvest")]
#[command(version)]
#[command(about = "Harvests a noun list from an online dictionary", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the dictionary and write the accepted words
    Crawl {
        /// Word list destination (overrides output.words-path)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Build a prefix tree from a word list
    BuildTrie {
        /// Word list to read (defaults to output.words-path)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Trie destination (defaults to output.trie-path)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Config comes first so its [logging] section can shape the subscriber
    let loaded = cli
        .config
        .as_deref()
        .map(load_config_with_hash)
        .transpose()
        .context("failed to load configuration");

    let logging = match &loaded {
        Ok(Some((config, _))) => config.logging.clone(),
        _ => LoggingConfig::default(),
    };
    setup_logging(cli.verbose, cli.quiet, &logging)?;

    let config = match loaded {
        Ok(Some((config, hash))) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        Ok(None) => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            return Err(e);
        }
    };

    match cli.command {
        Command::Crawl { output } => handle_crawl(config, output).await,
        Command::BuildTrie { input, output } => handle_build_trie(&config, input, output),
    }
}

/// Sets up the logging/tracing subscriber
///
/// Verbosity flags win over the configured level. With `logging.file` set,
/// events go to both stdout and that file.
fn setup_logging(verbose: u8, quiet: bool, logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match (verbose, logging.level.as_deref()) {
            (0, Some(level)) => EnvFilter::try_new(level)
                .with_context(|| format!("invalid logging level '{}'", level))?,
            (0, None) => EnvFilter::new("noun_harvest=info,warn"),
            (1, _) => EnvFilter::new("noun_harvest=debug,info"),
            (2, _) => EnvFilter::new("noun_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false);

    match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file '{}'", path))?;
            builder
                .with_ansi(false)
                .with_writer(std::io::stdout.and(Mutex::new(file)))
                .init();
        }
        None => builder.init(),
    }

    Ok(())
}

/// Handles the `crawl` subcommand
async fn handle_crawl(mut config: Config, output: Option<PathBuf>) -> anyhow::Result<()> {
    if let Some(path) = output {
        config.output.words_path = path.display().to_string();
    }

    tracing::info!(
        "Crawling {} letters from {}",
        config.alphabet().len(),
        config.source.index_url_template
    );
    tracing::info!("Verifying nouns against {}", config.verifier.base_url);

    match run_crawl(config).await {
        Ok(outcome) => {
            tracing::info!(
                "Crawl finished: {} words, {} letters failed",
                outcome.words.len(),
                outcome.failed_units.len()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(tag = "FATAL", "Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the `build-trie` subcommand
fn handle_build_trie(
    config: &Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let input = input.unwrap_or_else(|| PathBuf::from(&config.output.words_path));
    let output = output.unwrap_or_else(|| PathBuf::from(&config.output.trie_path));

    let trie = build_trie_file(&input, &output)
        .with_context(|| format!("failed to write trie to {}", output.display()))?;

    println!(
        "✓ Trie with {} words written to: {}",
        trie.word_count(),
        output.display()
    );

    Ok(())
}
