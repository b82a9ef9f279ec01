//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct. Every cooking option can also
//! be set through a `COOKED_GOOSE_*` environment variable.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

const AFTER_HELP: &str = "\
Lines between `-- +goose ENVSUB ON` and `-- +goose ENVSUB OFF` have ${VAR} and
$VAR references replaced from the environment. A region without an OFF marker
runs to the end of the file. Unset variables are an error.

Examples:
  # Process all SQL files in the \"migrations\" directory
  cooked-goose migrations

  # Process only *.up.sql files and overwrite conflicts
  cooked-goose migrations --up --overwrite

  # Process only *.down.sql files
  cooked-goose migrations --down

  # Process SQL files and output to a custom directory
  cooked-goose migrations --output-dir custom_cooked

  # A directory named \"completions\" must be given as a path
  cooked-goose ./completions";

/// cooked-goose - Environment substitution for goose migrations.
#[derive(Debug, Parser)]
#[command(name = "cooked-goose")]
#[command(author, version, about, long_about = None, after_help = AFTER_HELP)]
pub struct Cli {
    #[command(flatten)]
    pub cook: CookArgs,

    /// Show every processed file
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for cooking a migration directory (the default action).
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CookArgs {
    /// Directory containing goose migrations
    #[arg(value_name = "DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Process only *.up.sql files
    #[arg(long, conflicts_with = "down")]
    pub up: bool,

    /// Process only *.down.sql files
    #[arg(long)]
    pub down: bool,

    /// Overwrite files that already exist in the output directory
    #[arg(long, env = "COOKED_GOOSE_OVERWRITE")]
    pub overwrite: bool,

    /// Output directory (default is [DIRECTORY]_cooked)
    #[arg(short, long, value_name = "DIR", env = "COOKED_GOOSE_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Load variables from an env file (repeatable, later files win)
    #[arg(long = "env-file", value_name = "PATH", env = "COOKED_GOOSE_ENV_FILE")]
    pub env_files: Vec<PathBuf>,

    /// Set a variable, overriding the environment (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Keep processing other files after a failure
    #[arg(long, env = "COOKED_GOOSE_KEEP_GOING")]
    pub keep_going: bool,

    /// Interpolate without writing any files
    #[arg(long)]
    pub dry_run: bool,

    /// Print a JSON report instead of status messages
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
