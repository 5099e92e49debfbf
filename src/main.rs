//! Music Shelf - organize a flat pile of audio files into a tidy library.
//!
//! Reads the embedded metadata of every audio file under a source root,
//! builds a normalized Artist -> Album -> Track catalog from it, and copies
//! each file into `<library>/<Artist>/<Album>/<NN - Title>.mp3`. Copies are
//! idempotent: files already in the library are left alone, so re-running an
//! import never duplicates work.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod importer;
pub mod materializer;
pub mod metadata;
pub mod scanner;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("music_shelf=info".parse()?))
        .init();

    cli::run_command(&args)
}
