//! The default action: cook a migration directory.

use std::path::{Path, PathBuf};

use crate::cli::args::CookArgs;
use crate::config::VariableSources;
use crate::error::Result;
use crate::migrations::{
    default_output_dir, CookOptions, CookReport, CookStatus, Cooker, FailurePolicy,
    MigrationFilter,
};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The cook command implementation.
pub struct CookCommand {
    directory: PathBuf,
    args: CookArgs,
}

impl CookCommand {
    /// Create a new cook command for `directory`.
    pub fn new(directory: PathBuf, args: CookArgs) -> Self {
        Self { directory, args }
    }

    fn output_dir(&self) -> PathBuf {
        self.args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&self.directory))
    }

    fn options(&self) -> CookOptions {
        let policy = if self.args.keep_going {
            FailurePolicy::KeepGoing
        } else {
            FailurePolicy::FailFast
        };

        CookOptions::new(self.output_dir())
            .with_filter(MigrationFilter::from_flags(self.args.up, self.args.down))
            .with_overwrite(self.args.overwrite)
            .with_failure_policy(policy)
            .with_dry_run(self.args.dry_run)
    }

    fn sources(&self) -> VariableSources {
        VariableSources {
            env_files: self.args.env_files.clone(),
            assignments: self.args.vars.clone(),
            process_env: true,
        }
    }

    fn show_report(&self, report: &CookReport, output_dir: &Path, ui: &mut dyn UserInterface) {
        let details = ui.output_mode().shows_details();

        for file in &report.files {
            match file.status {
                CookStatus::Written if details => {
                    ui.detail(&format!("Wrote {}", file.destination.display()))
                }
                CookStatus::DryRun if details => {
                    ui.detail(&format!("Would write {}", file.destination.display()))
                }
                CookStatus::Written | CookStatus::DryRun => {}
                CookStatus::Skipped => ui.skipped(&format!(
                    "Skipping existing file {} (overwrite disabled)",
                    file.destination.display()
                )),
                CookStatus::Failed => {
                    ui.error(file.error.as_deref().unwrap_or("Unknown failure"));
                }
            }
        }

        if !report.is_success() {
            ui.error(&format!(
                "{} of {} migration(s) failed",
                report.failed(),
                report.files.len()
            ));
        } else if self.args.dry_run {
            ui.success(&format!(
                "Dry run complete: {} migration(s) would be written to {}",
                report.dry_run(),
                output_dir.display()
            ));
        } else if report.files.is_empty() {
            ui.warning(&format!(
                "No matching migrations found in {}",
                self.directory.display()
            ));
        } else {
            ui.success(&format!(
                "Processing completed successfully: {} written, {} skipped ({})",
                report.written(),
                report.skipped(),
                output_dir.display()
            ));
        }
    }
}

impl Command for CookCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let context = self.sources().load()?;
        let options = self.options();
        let output_dir = options.output_dir.clone();

        tracing::debug!(
            "Cooking {} into {} ({:?})",
            self.directory.display(),
            output_dir.display(),
            options
        );

        if !self.args.json {
            ui.message(&format!(
                "Cooking {} into {}",
                self.directory.display(),
                output_dir.display()
            ));
        }

        let cooker = Cooker::new(&context, options);
        let report = cooker.cook_directory(&self.directory)?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
            println!("{}", json);
        } else {
            self.show_report(&report, &output_dir, ui);
        }

        if report.is_success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
