//! Regcat main entry point
//!
//! This is the command-line interface for the regulatory catalog harvester.

use anyhow::Context;
use clap::{Parser, Subcommand};
use regcat::config::{default_config, load_config_with_hash, Config};
use regcat::crawler::{Coordinator, SearchFilter, UpdateRequest};
use regcat::output::print_report;
use regcat::storage::{update_source_path, with_xlsx_extension};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Regcat: a regulatory catalog harvester
///
/// Regcat walks a paginated regulation search listing and keeps a
/// spreadsheet of every listed document, either crawled from scratch or
/// brought up to date incrementally.
#[derive(Parser, Debug)]
#[command(name = "regcat")]
#[command(version)]
#[command(about = "A regulatory catalog harvester", long_about = None)]
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
    /// Crawl every listed document of a category into a new spreadsheet
    Crawl {
        /// Regulation category, as named on the site
        #[arg(long)]
        category: String,

        /// Region, as named on the site
        #[arg(long)]
        region: Option<String>,

        /// Issue year
        #[arg(long)]
        year: Option<String>,

        /// Output file (default: <category><region>-<year>.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Add newly published documents to an existing spreadsheet
    Update {
        /// Regulation category the spreadsheet belongs to
        #[arg(long)]
        category: String,

        /// Existing spreadsheet (default: <category>-全部.xlsx)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output file (default: overwrite the existing spreadsheet)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load(&cli.config)?;
    let mut coordinator =
        Coordinator::from_config(config).context("Failed to set up the crawler")?;

    let report = match cli.command {
        Command::Crawl {
            category,
            region,
            year,
            output,
        } => {
            let filter = SearchFilter::new(&category, region.as_deref(), year.as_deref());
            coordinator
                .crawl_all(&filter, output.map(with_xlsx_extension))
                .await
        }
        Command::Update {
            category,
            file,
            output,
        } => {
            let dataset_path = match file {
                Some(path) => path,
                None => update_source_path(
                    &std::env::current_dir()?,
                    &category,
                    &coordinator.config().site.all_years_label,
                ),
            };
            let request = UpdateRequest {
                category,
                dataset_path,
                save_path: output.map(with_xlsx_extension),
            };
            coordinator.update(&request).await
        }
    };

    match report {
        Ok(report) => {
            if !cli.quiet {
                print_report(&report);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}

/// Loads the configuration file, or the defaults when none is given
fn load(path: &Option<PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => {
            tracing::debug!("No configuration file given; using defaults");
            Ok(default_config()?)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("regcat=info,warn"),
            1 => EnvFilter::new("regcat=debug,info"),
            2 => EnvFilter::new("regcat=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
