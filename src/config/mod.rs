//! Configuration of variable sources.
//!
//! Command-line flags (and their `COOKED_GOOSE_*` environment equivalents)
//! are defined in [`crate::cli::args`]. This module turns the variable-related
//! flags into an [`crate::envsub::VariableContext`].

pub mod env_file;
pub mod variables;

pub use env_file::EnvFileParser;
pub use variables::{parse_assignments, VariableSources};
