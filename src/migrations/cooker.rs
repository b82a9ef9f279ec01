//! Cooking a directory of migrations into a mirrored output tree.
//!
//! Each selected file is read whole, interpolated in memory, and only then
//! written, so a file that fails never leaves partial output behind.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::envsub::{process_bytes_with_observer, Environment, TracingObserver};
use crate::error::{CookedGooseError, Result};

use super::filter::MigrationFilter;
use super::walker::collect_migrations;

/// What to do when a migration cannot be interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failing file.
    #[default]
    FailFast,
    /// Record the failure and continue with the next file.
    KeepGoing,
}

/// Options for a cooking run.
#[derive(Debug, Clone)]
pub struct CookOptions {
    pub output_dir: PathBuf,
    pub filter: MigrationFilter,
    pub overwrite: bool,
    pub failure_policy: FailurePolicy,
    pub dry_run: bool,
}

impl CookOptions {
    /// Options writing into `output_dir` with default behavior.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            filter: MigrationFilter::All,
            overwrite: false,
            failure_policy: FailurePolicy::FailFast,
            dry_run: false,
        }
    }

    pub fn with_filter(mut self, filter: MigrationFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// The default output directory: a `_cooked` sibling of the input.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use cooked_goose::migrations::default_output_dir;
///
/// assert_eq!(default_output_dir(Path::new("db/migrations/")), PathBuf::from("db/migrations_cooked"));
/// ```
pub fn default_output_dir(input_dir: &Path) -> PathBuf {
    let normalized: PathBuf = input_dir.components().collect();

    let name = normalized
        .file_name()
        .map(|n| n.to_os_string())
        .or_else(|| {
            fs::canonicalize(&normalized)
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_os_string()))
        });

    match name {
        Some(mut name) => {
            name.push("_cooked");
            if normalized.file_name().is_some() {
                normalized.with_file_name(name)
            } else {
                normalized.join("..").join(name)
            }
        }
        None => PathBuf::from("cooked"),
    }
}

/// Outcome for a single migration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CookStatus {
    /// The cooked file was written.
    Written,
    /// The destination already existed and overwrite is disabled.
    Skipped,
    /// Dry run: the file interpolated cleanly but was not written.
    DryRun,
    /// Interpolation or IO failed.
    Failed,
}

/// A processed migration file.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub status: CookStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of a cooking run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CookReport {
    pub files: Vec<FileOutcome>,
}

impl CookReport {
    fn count(&self, status: CookStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }

    /// Number of files written.
    pub fn written(&self) -> usize {
        self.count(CookStatus::Written)
    }

    /// Number of files skipped because the destination existed.
    pub fn skipped(&self) -> usize {
        self.count(CookStatus::Skipped)
    }

    /// Number of files that would have been written in a dry run.
    pub fn dry_run(&self) -> usize {
        self.count(CookStatus::DryRun)
    }

    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.count(CookStatus::Failed)
    }

    /// Whether every file succeeded or was skipped.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Interpolates migration files from a source tree into an output tree.
pub struct Cooker<'a> {
    env: &'a dyn Environment,
    options: CookOptions,
}

impl<'a> Cooker<'a> {
    /// Create a cooker reading variables from `env`.
    pub fn new(env: &'a dyn Environment, options: CookOptions) -> Self {
        Self { env, options }
    }

    /// Cook every selected migration under `input_dir`.
    ///
    /// Files already inside the output directory are ignored, so an output
    /// tree nested in the input is never cooked twice.
    ///
    /// # Errors
    ///
    /// Fails if `input_dir` cannot be walked. With
    /// [`FailurePolicy::FailFast`], also returns the first
    /// [`CookedGooseError::DocumentFailed`].
    pub fn cook_directory(&self, input_dir: &Path) -> Result<CookReport> {
        let files = collect_migrations(input_dir, self.options.filter)?;
        tracing::debug!(
            "Found {} migration(s) in {}",
            files.len(),
            input_dir.display()
        );

        let mut report = CookReport::default();

        for source in files {
            if source.starts_with(&self.options.output_dir) {
                continue;
            }

            let relative = source
                .strip_prefix(input_dir)
                .map_err(anyhow::Error::from)?;
            let destination = self.options.output_dir.join(relative);

            let (status, error) = match self.cook_file(&source, &destination) {
                Ok(status) => (status, None),
                Err(e) if self.options.failure_policy == FailurePolicy::KeepGoing => {
                    tracing::debug!("Continuing after failure: {}", e);
                    (CookStatus::Failed, Some(e.to_string()))
                }
                Err(e) => return Err(e),
            };

            report.files.push(FileOutcome {
                source,
                destination,
                status,
                error,
            });
        }

        Ok(report)
    }

    /// Cook a single migration file.
    ///
    /// The file is interpolated before the overwrite check, so a broken
    /// migration is reported even when its output already exists.
    pub fn cook_file(&self, source: &Path, destination: &Path) -> Result<CookStatus> {
        let content =
            fs::read(source).map_err(|e| CookedGooseError::from(e).in_document(source))?;

        let mut observer = TracingObserver::new(source.display().to_string());
        let cooked = process_bytes_with_observer(&content, self.env, &mut observer)
            .map_err(|e| e.in_document(source))?;

        if !self.options.overwrite && destination.exists() {
            tracing::debug!(
                "Skipping existing file {} (overwrite disabled)",
                destination.display()
            );
            return Ok(CookStatus::Skipped);
        }

        if self.options.dry_run {
            tracing::debug!("Would write {}", destination.display());
            return Ok(CookStatus::DryRun);
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(destination, cooked)
            .map_err(|e| CookedGooseError::from(e).in_document(destination))?;
        tracing::debug!("Wrote {}", destination.display());

        Ok(CookStatus::Written)
    }
}
