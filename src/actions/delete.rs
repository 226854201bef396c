//! Permanent deletion of confirmed duplicates.
//!
//! # Overview
//!
//! Given the duplicate groups produced by the finder, deletes every member
//! of each group except the keep-file selected by
//! [`DuplicateGroup::keep_file`] (shortest base-filename stem, ties broken
//! alphabetically).
//!
//! # Safety
//!
//! The keep-file is never deleted, so one copy of every group's content
//! always survives. Per-file failures are collected rather than aborting
//! the batch.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::actions::delete_duplicates;
//! use dupescan::duplicates::DuplicateGroup;
//!
//! let groups: Vec<DuplicateGroup> = vec![];
//! let result = delete_duplicates(&groups);
//! println!("Freed {} bytes", result.bytes_freed);
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::duplicates::DuplicateGroup;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have vanished since the scan).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    fn from_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io { path, source },
        }
    }
}

/// Results of a batch deletion operation.
#[derive(Debug, Default)]
pub struct BatchDeleteResult {
    /// Paths that were deleted.
    pub deleted: Vec<PathBuf>,
    /// Paths that were kept (one per group).
    pub kept: Vec<PathBuf>,
    /// Failed deletions with their errors.
    pub failures: Vec<DeleteError>,
    /// Total bytes freed.
    pub bytes_freed: u64,
}

impl BatchDeleteResult {
    /// Check if all deletions succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Delete every member of each group except its keep-file.
///
/// Failures are logged and collected per file; sibling deletions and
/// other groups proceed regardless.
#[must_use]
pub fn delete_duplicates(groups: &[DuplicateGroup]) -> BatchDeleteResult {
    let mut result = BatchDeleteResult::default();

    for group in groups {
        let keep = group.keep_file().to_path_buf();
        log::info!("Keeping: {}", display_name(&keep));

        for path in group.paths() {
            if path == keep {
                continue;
            }
            log::info!("Deleting: {}", display_name(&path));
            match fs::remove_file(&path) {
                Ok(()) => {
                    result.bytes_freed += group.size;
                    result.deleted.push(path);
                }
                Err(e) => {
                    let err = DeleteError::from_io(path, e);
                    log::warn!("Failed to delete: {}", err);
                    result.failures.push(err);
                }
            }
        }

        result.kept.push(keep);
    }

    log::info!(
        "Deleted {} files, freed {} bytes ({} failures)",
        result.deleted.len(),
        result.bytes_freed,
        result.failures.len()
    );

    result
}

fn display_name(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap().write_all(content).unwrap();
        path
    }

    #[test]
    fn test_keep_file_survives() {
        let dir = tempdir().unwrap();
        let long = write_file(dir.path(), "longer-name.txt", b"same");
        let short = write_file(dir.path(), "abc.txt", b"same");

        let group =
            DuplicateGroup::from_members([0u8; 32], 4, vec![long.clone(), short.clone()]).unwrap();
        let result = delete_duplicates(&[group]);

        assert!(result.all_succeeded());
        assert!(short.exists());
        assert!(!long.exists());
        assert_eq!(result.bytes_freed, 4);
        assert_eq!(result.kept, vec![short]);
        assert_eq!(result.deleted, vec![long]);
    }

    #[test]
    fn test_missing_member_is_isolated_failure() {
        let dir = tempdir().unwrap();
        let keep = write_file(dir.path(), "a.txt", b"same");
        let present = write_file(dir.path(), "zzzz.txt", b"same");
        let gone = dir.path().join("zzz-gone.txt");

        let group = DuplicateGroup::from_members(
            [0u8; 32],
            4,
            vec![keep.clone(), present.clone(), gone],
        )
        .unwrap();
        let result = delete_duplicates(&[group]);

        // One failure recorded, but the sibling deletion still happened
        assert_eq!(result.failures.len(), 1);
        assert!(matches!(result.failures[0], DeleteError::NotFound(_)));
        assert!(!present.exists());
        assert!(keep.exists());
    }

    #[test]
    fn test_empty_groups_no_op() {
        let result = delete_duplicates(&[]);
        assert!(result.all_succeeded());
        assert!(result.deleted.is_empty());
        assert_eq!(result.bytes_freed, 0);
    }
}
