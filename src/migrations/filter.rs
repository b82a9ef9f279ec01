//! Selecting which migration files to cook.

use std::path::Path;

/// Which migrations to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MigrationFilter {
    /// Every `*.sql` file.
    #[default]
    All,
    /// Only `*.up.sql` files.
    Up,
    /// Only `*.down.sql` files.
    Down,
}

impl MigrationFilter {
    /// Build a filter from the `--up`/`--down` flags.
    pub fn from_flags(up: bool, down: bool) -> Self {
        if up {
            Self::Up
        } else if down {
            Self::Down
        } else {
            Self::All
        }
    }

    /// The file-name suffix this filter requires.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::All => ".sql",
            Self::Up => ".up.sql",
            Self::Down => ".down.sql",
        }
    }

    /// Check whether a file is selected.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(self.suffix()))
    }
}
