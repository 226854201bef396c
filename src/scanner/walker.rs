//! Directory walker for candidate file discovery.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct, the enumeration stage of the
//! detection pipeline. It yields one [`FileEntry`] per distinct real file:
//! every entry is resolved to its canonical (symlink-dereferenced) path
//! before being recorded, and paths already seen in the same walk are
//! skipped. Two symlinks pointing at the same target therefore collapse to
//! one candidate instead of surfacing as a spurious "duplicate" of the
//! same inode.
//!
//! Entries that fail to resolve or stat are yielded as [`ScanError`] items
//! rather than stopping iteration; the caller decides whether to warn and
//! continue. One bad entry never aborts the walk.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), true);
//! let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
//! println!("Found {} candidate files", files.len());
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileEntry, ScanError};

/// Directory walker yielding deduplicated canonical file entries.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Whether to descend into subdirectories
    recursive: bool,
}

impl Walker {
    /// Create a new walker for the given root.
    ///
    /// Non-recursive mode lists only the immediate directory entries;
    /// recursive mode walks the full subtree.
    #[must_use]
    pub fn new(root: &Path, recursive: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            recursive,
        }
    }

    /// Walk the tree, yielding file entries or per-entry scan errors.
    ///
    /// Directory symlinks are not followed (the canonical-path dedupe
    /// handles file symlinks; following directory links risks cycles).
    /// Entries are visited in file-name order for deterministic output.
    pub fn walk(&self) -> Box<dyn Iterator<Item = Result<FileEntry, ScanError>> + '_> {
        if self.recursive {
            Box::new(self.walk_recursive())
        } else {
            Box::new(self.walk_flat())
        }
    }

    fn walk_recursive(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        let mut seen: HashSet<PathBuf> = HashSet::new();

        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    if entry.file_type().is_dir() {
                        return None;
                    }
                    resolve_entry(entry.path(), &mut seen)
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    match e.into_io_error() {
                        Some(io) => Some(Err(ScanError::from_io(path, io))),
                        None => None,
                    }
                }
            })
    }

    fn walk_flat(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        let mut seen: HashSet<PathBuf> = HashSet::new();

        let entries = match fs::read_dir(&self.root) {
            Ok(rd) => {
                let mut entries: Vec<_> = rd.collect();
                entries.sort_by_key(|r| r.as_ref().map(fs::DirEntry::file_name).unwrap_or_default());
                entries
            }
            Err(e) => {
                return Either::Left(std::iter::once(Err(ScanError::from_io(
                    self.root.clone(),
                    e,
                ))))
            }
        };

        Either::Right(entries.into_iter().filter_map(move |entry_result| {
            match entry_result {
                Ok(entry) => {
                    let path = entry.path();
                    // read_dir never yields ".." entries, but it does yield
                    // subdirectories, which a flat listing must skip
                    if path.is_dir() {
                        return None;
                    }
                    resolve_entry(&path, &mut seen)
                }
                Err(e) => Some(Err(ScanError::from_io(self.root.clone(), e))),
            }
        }))
    }
}

/// Canonicalize one entry, stat it, and dedupe against already-seen paths.
///
/// Returns `None` for entries that collapse onto a path seen earlier in
/// this walk and for resolved targets that are not regular files.
fn resolve_entry(
    path: &Path,
    seen: &mut HashSet<PathBuf>,
) -> Option<Result<FileEntry, ScanError>> {
    let real_path = match fs::canonicalize(path) {
        Ok(p) => p,
        Err(e) => return Some(Err(ScanError::from_io(path.to_path_buf(), e))),
    };

    if !seen.insert(real_path.clone()) {
        log::debug!(
            "Skipping {}: already recorded as {}",
            path.display(),
            real_path.display()
        );
        return None;
    }

    let metadata = match fs::metadata(&real_path) {
        Ok(m) => m,
        Err(e) => return Some(Err(ScanError::from_io(real_path, e))),
    };

    // A symlink may resolve to a directory or special file
    if !metadata.is_file() {
        return None;
    }

    Some(Ok(FileEntry::new(real_path, metadata.len())))
}

/// Minimal either-iterator so both `walk_flat` branches unify.
enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L, R, T> Iterator for Either<L, R>
where
    L: Iterator<Item = T>,
    R: Iterator<Item = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self {
            Either::Left(l) => l.next(),
            Either::Right(r) => r.next(),
        }
    }
}
