//! Recursive discovery of migration files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CookedGooseError, Result};

use super::filter::MigrationFilter;

/// Collect every file under `root` selected by `filter`, sorted by path.
///
/// Symlinked directories are not descended into. Symlinks to files are
/// collected like regular files.
///
/// # Errors
///
/// Returns [`CookedGooseError::InputNotFound`] if `root` does not exist and
/// [`CookedGooseError::NotADirectory`] if it is a file.
pub fn collect_migrations(root: &Path, filter: MigrationFilter) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(CookedGooseError::InputNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(CookedGooseError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    collect_recursive(root, filter, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_recursive(
    dir: &Path,
    filter: MigrationFilter,
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            collect_recursive(&path, filter, files)?;
        } else if file_type.is_symlink() && path.is_dir() {
            tracing::debug!("Not following symlinked directory {}", path.display());
        } else if filter.matches(&path) {
            files.push(path);
        }
    }

    Ok(())
}
