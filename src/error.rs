//! Error types for cooked-goose operations.
//!
//! This module defines [`CookedGooseError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Interpolation failures carry the offending line so the user can find it
//! - [`CookedGooseError::DocumentFailed`] attaches the migration path on top
//! - Use `anyhow::Error` (via `CookedGooseError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cooked-goose operations.
#[derive(Debug, Error)]
pub enum CookedGooseError {
    /// A variable referenced inside an ENVSUB region has no value.
    #[error("{name} not set in environment (line {line_number}: {line:?})")]
    UnboundVariable {
        line_number: usize,
        line: String,
        name: String,
    },

    /// A variable reference inside an ENVSUB region is malformed.
    #[error("Invalid interpolation on line {line_number}: {message} ({line:?})")]
    InterpolationSyntax {
        line_number: usize,
        line: String,
        message: String,
    },

    /// A line inside an ENVSUB region is not valid UTF-8.
    #[error("Line {line_number} is not valid UTF-8 ({line:?})")]
    InvalidEncoding { line_number: usize, line: String },

    /// A migration file could not be interpolated.
    #[error("Failed to process {path}: {source}")]
    DocumentFailed {
        path: PathBuf,
        #[source]
        source: Box<CookedGooseError>,
    },

    /// The input directory does not exist.
    #[error("Input directory not found: {path}")]
    InputNotFound { path: PathBuf },

    /// The input path exists but is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A `--var` override is not in `KEY=VALUE` form.
    #[error("Invalid variable assignment '{assignment}': expected KEY=VALUE")]
    InvalidVariable { assignment: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CookedGooseError {
    /// Attach the migration path to an interpolation error.
    pub fn in_document(self, path: impl Into<PathBuf>) -> Self {
        Self::DocumentFailed {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// The source line that failed to interpolate, if any.
    pub fn failing_line(&self) -> Option<&str> {
        match self {
            Self::UnboundVariable { line, .. }
            | Self::InterpolationSyntax { line, .. }
            | Self::InvalidEncoding { line, .. } => Some(line),
            Self::DocumentFailed { source, .. } => source.failing_line(),
            _ => None,
        }
    }
}

/// Result type alias for cooked-goose operations.
pub type Result<T> = std::result::Result<T, CookedGooseError>;
