//! Size-based grouping and duplicate group management.
//!
//! # Overview
//!
//! This module provides the pure grouping primitives of the pipeline:
//!
//! - [`group_by_size`]: Stage 2. Buckets candidates by exact byte size and
//!   prunes singletons, since one-of-a-kind sizes can never be duplicates.
//!   This is the dominant filter in real directories and costs no file I/O.
//! - [`DuplicateGroup`]: a confirmed set of byte-identical files, with the
//!   canonical representative and the keep-selection heuristic applied by
//!   the deletion collaborator.
//!
//! # Example
//!
//! ```
//! use dupescan::scanner::FileEntry;
//! use dupescan::duplicates::group_by_size;
//! use std::path::PathBuf;
//!
//! let files = vec![
//!     FileEntry::new(PathBuf::from("/a.txt"), 1024),
//!     FileEntry::new(PathBuf::from("/b.txt"), 1024),
//!     FileEntry::new(PathBuf::from("/c.txt"), 2048),
//! ];
//!
//! // Only groups with 2+ files are potential duplicates
//! let (groups, stats) = group_by_size(files);
//!
//! assert_eq!(stats.total_files, 3);
//! assert_eq!(stats.potential_duplicates, 2);
//! assert_eq!(groups.len(), 1);
//! ```

use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::scanner::{hash_to_hex, FileEntry, Hash};

/// Confirmed duplicate group of byte-identical files.
///
/// `canonical` is the lexicographically smallest path in the group, chosen
/// after grouping so the result is deterministic across runs and platforms
/// regardless of enumeration or hashing order.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    /// BLAKE3 hash of the file content
    #[serde(serialize_with = "serialize_hash_hex")]
    pub hash: Hash,
    /// File size in bytes (shared by all members)
    pub size: u64,
    /// Representative path (lexicographically smallest member)
    pub canonical: PathBuf,
    /// The other members, identical in content to `canonical`
    pub duplicates: Vec<PathBuf>,
}

fn serialize_hash_hex<S: serde::Serializer>(hash: &Hash, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&hash_to_hex(hash))
}

impl DuplicateGroup {
    /// Build a group from the full member set of one full-hash bucket.
    ///
    /// Paths are sorted; the smallest becomes canonical and the rest are
    /// recorded as its duplicates. Returns `None` for buckets with fewer
    /// than two members, which cannot be duplicate groups.
    #[must_use]
    pub fn from_members(hash: Hash, size: u64, mut paths: Vec<PathBuf>) -> Option<Self> {
        if paths.len() < 2 {
            return None;
        }
        paths.sort();
        let canonical = paths.remove(0);
        Some(Self {
            hash,
            size,
            canonical,
            duplicates: paths,
        })
    }

    /// All member paths: canonical first, then duplicates.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut all = Vec::with_capacity(self.duplicates.len() + 1);
        all.push(self.canonical.clone());
        all.extend(self.duplicates.iter().cloned());
        all
    }

    /// Number of duplicate copies (members minus the canonical).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.duplicates.len()
    }

    /// Space reclaimed by keeping one member and deleting the rest.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicates.len() as u64
    }

    /// Hash as hexadecimal string.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }

    /// Choose the member to keep when deleting this group.
    ///
    /// Selection is by shortest base-filename stem, ties broken
    /// alphabetically. The canonical path is just one candidate here,
    /// not authoritative.
    #[must_use]
    pub fn keep_file(&self) -> &Path {
        let mut best: &PathBuf = &self.canonical;
        let mut best_key = stem_key(best);
        for path in &self.duplicates {
            let key = stem_key(path);
            if key < best_key {
                best = path;
                best_key = key;
            }
        }
        best
    }
}

/// Ordering key for keep-selection: (stem length, stem).
fn stem_key(path: &Path) -> (usize, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    (stem.chars().count(), stem)
}

/// Statistics from the size-grouping stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Total number of files processed
    pub total_files: usize,
    /// Total size of all files in bytes
    pub total_size: u64,
    /// Number of unique file sizes
    pub unique_sizes: usize,
    /// Number of files that could still be duplicates (in groups of 2+)
    pub potential_duplicates: usize,
    /// Number of files eliminated as unique (singleton size buckets)
    pub eliminated_unique: usize,
    /// Number of size groups with 2+ files
    pub duplicate_groups: usize,
}

impl GroupingStats {
    /// Percentage of files eliminated by size grouping.
    #[must_use]
    pub fn elimination_rate(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.eliminated_unique as f64 / self.total_files as f64) * 100.0
        }
    }
}

/// Group candidate files by exact byte size.
///
/// First narrowing stage of the pipeline. Files with different sizes cannot
/// be duplicates, so only buckets with 2+ members survive into the hashing
/// stages. No file I/O is performed.
///
/// Note that empty files are grouped like any others: identical empty files
/// are still byte-identical duplicates.
#[must_use]
pub fn group_by_size(
    files: impl IntoIterator<Item = FileEntry>,
) -> (HashMap<u64, Vec<FileEntry>>, GroupingStats) {
    let mut all_groups: HashMap<u64, Vec<FileEntry>> = HashMap::new();
    let mut stats = GroupingStats::default();

    for file in files {
        stats.total_files += 1;
        stats.total_size += file.size;
        all_groups.entry(file.size).or_default().push(file);
    }

    stats.unique_sizes = all_groups.len();

    let filtered: HashMap<u64, Vec<FileEntry>> = all_groups
        .into_iter()
        .filter(|(size, group)| {
            if group.len() < 2 {
                stats.eliminated_unique += 1;
                log::trace!("Eliminated unique size {}: {}", size, group[0].path.display());
                false
            } else {
                stats.potential_duplicates += group.len();
                stats.duplicate_groups += 1;
                log::debug!("Size bucket {} bytes: {} candidates", size, group.len());
                true
            }
        })
        .collect();

    log::info!(
        "Size grouping: {} files, {} candidates remain ({:.1}% eliminated)",
        stats.total_files,
        stats.potential_duplicates,
        stats.elimination_rate()
    );

    (filtered, stats)
}
