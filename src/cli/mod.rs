//! Command-line interface for music-shelf.
//!
//! Provides the `import` and `list` commands over the catalog and import
//! pipeline.

mod commands;

pub use commands::{Cli, Commands, run_command};
