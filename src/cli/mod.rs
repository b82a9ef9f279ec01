//! Command-line interface for cooked-goose.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, CookArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
