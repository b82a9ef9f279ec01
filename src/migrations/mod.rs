//! Migration directory processing.
//!
//! - [`filter`] - which files are selected (`--up`, `--down`)
//! - [`walker`] - recursive discovery of selected files
//! - [`cooker`] - interpolation into the mirrored output tree

pub mod cooker;
pub mod filter;
pub mod walker;

pub use cooker::{
    default_output_dir, CookOptions, CookReport, CookStatus, Cooker, FailurePolicy, FileOutcome,
};
pub use filter::MigrationFilter;
pub use walker::collect_migrations;
