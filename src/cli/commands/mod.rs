//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`]; cooking a directory is the default when
//! no subcommand is given.

pub mod completions;
pub mod cook;
pub mod dispatcher;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
