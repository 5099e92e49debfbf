//! CLI command definitions and handlers.
//!
//! Each subcommand is implemented as a function that takes the parsed
//! arguments and returns an `anyhow::Result<()>`. Per-file problems are
//! printed and counted but never abort a run; only setup failures (a missing
//! source directory, a broken runtime) exit nonzero.

use anyhow::Context;
use clap::{Parser, Subcommand};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::importer::{self, ImportEvent};

/// Music Shelf CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Copy audio files from a source directory into the organized library
    Import {
        /// Source directory to import from (defaults to the configured one)
        #[arg(short, long)]
        source: Option<PathBuf>,
        /// Library root to copy into (defaults to the configured one)
        #[arg(short, long)]
        library: Option<PathBuf>,
        /// Show what would be copied without touching the library
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the catalog built from a source directory as JSON
    List {
        /// Source directory to catalog (defaults to the configured one)
        #[arg(short, long)]
        source: Option<PathBuf>,
    },
}

/// Dispatch the parsed command line.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new().context("failed to start async runtime")?;
    match &cli.command {
        Commands::Import {
            source,
            library,
            dry_run,
        } => cmd_import(&rt, source.as_deref(), library.as_deref(), *dry_run),
        Commands::List { source } => cmd_list(&rt, source.as_deref()),
    }
}

/// Resolve the source and library roots from arguments and config.
fn resolve_roots(
    config: &Config,
    source: Option<&Path>,
    library: Option<&Path>,
) -> (PathBuf, PathBuf) {
    let source_root = source
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.import.source_root.clone());
    let library_root = library
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.import.library_root.clone());
    (source_root, library_root)
}

fn new_catalog(config: &Config) -> Catalog {
    if config.import.merge_duplicate_albums {
        Catalog::merging_duplicates()
    } else {
        Catalog::new()
    }
}

/// Import a source directory into the library
fn cmd_import(
    rt: &Runtime,
    source: Option<&Path>,
    library: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let config = Config::load().unwrap_or_default();
    let (source_root, library_root) = resolve_roots(&config, source, library);
    anyhow::ensure!(
        source_root.is_dir(),
        "source root {:?} is not a directory",
        source_root
    );

    println!("Importing from {:?} into {:?}", source_root, library_root);
    if dry_run {
        println!("\n[DRY RUN MODE - no files will be copied]\n");
    }

    let mut catalog = new_catalog(&config);
    let (mut placed, mut skipped, mut failed) = (0, 0, 0);

    rt.block_on(async {
        let stream = importer::import(&mut catalog, &source_root, &library_root, dry_run);
        let mut stream = std::pin::pin!(stream);
        while let Some(event) = stream.next().await {
            match event {
                ImportEvent::Placed { source, dest } => {
                    let verb = if dry_run { "WOULD COPY" } else { "COPIED" };
                    println!("{}: {} -> {}", verb, source.display(), dest.display());
                    placed += 1;
                }
                ImportEvent::Skipped { path, reason } => {
                    println!("SKIPPED: {} ({})", path.display(), reason);
                    skipped += 1;
                }
                ImportEvent::Failed { path, error } => {
                    eprintln!("ERROR: {}: {}", path.display(), error);
                    failed += 1;
                }
            }
        }
    });

    println!(
        "\nCompleted: {} placed, {} skipped, {} failed",
        placed, skipped, failed
    );
    Ok(())
}

/// Build the catalog without copying anything and print it as JSON
fn cmd_list(rt: &Runtime, source: Option<&Path>) -> anyhow::Result<()> {
    let config = Config::load().unwrap_or_default();
    let (source_root, library_root) = resolve_roots(&config, source, None);
    anyhow::ensure!(
        source_root.is_dir(),
        "source root {:?} is not a directory",
        source_root
    );

    let mut catalog = new_catalog(&config);
    rt.block_on(async {
        let stream = importer::import(&mut catalog, &source_root, &library_root, true);
        let mut stream = std::pin::pin!(stream);
        while let Some(event) = stream.next().await {
            if let ImportEvent::Failed { path, error } = event {
                eprintln!("ERROR: {}: {}", path.display(), error);
            }
        }
    });

    let export: Vec<serde_json::Value> = catalog
        .artists()
        .iter()
        .map(|artist| {
            serde_json::json!({
                "name": artist.name,
                "albums": artist.album_summaries(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&export)?);
    Ok(())
}
