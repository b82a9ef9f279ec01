//! cooked-goose - Environment substitution for goose SQL migrations.
//!
//! cooked-goose copies a directory of goose migrations into a mirrored
//! output tree, replacing `${VAR}` references with environment values inside
//! `-- +goose ENVSUB ON` / `-- +goose ENVSUB OFF` regions. The result can be
//! fed to tools such as sqlc that do not understand goose's ENVSUB.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Variable sources (env files, `--var` overrides)
//! - [`envsub`] - Region detection and per-line interpolation
//! - [`error`] - Error types and result aliases
//! - [`migrations`] - Migration discovery and output tree writing
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use cooked_goose::envsub::process;
//!
//! let mut env = HashMap::new();
//! env.insert("APP_USER".to_string(), "app".to_string());
//!
//! let sql = "-- +goose ENVSUB ON\nCREATE ROLE ${APP_USER};\n";
//! assert_eq!(
//!     process(sql, &env).unwrap(),
//!     "-- +goose ENVSUB ON\nCREATE ROLE app;\n"
//! );
//! ```

pub mod cli;
pub mod config;
pub mod envsub;
pub mod error;
pub mod migrations;
pub mod ui;

pub use error::{CookedGooseError, Result};
