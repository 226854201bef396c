//! Duplicate finder implementation with multi-stage detection.
//!
//! # Overview
//!
//! This module orchestrates the progressive detection pipeline:
//! 1. **Enumerate** - Walk the tree and collect canonical candidates
//! 2. **Size grouping** - Bucket by exact size (see [`crate::duplicates::groups`])
//! 3. **Prefix hash** - Hash only the first `chunk_size` bytes of survivors
//! 4. **Full hash** - Hash entire content to confirm duplicates
//!
//! Each hashing stage is a pure function over the candidate set produced by
//! the prior stage. The prefix stage is the cost-saving device: it is far
//! cheaper than full hashing and eliminates most same-size-but-different-
//! content candidates before any full read is paid for.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default().with_recursive(true));
//! let (groups, summary) = finder.find_duplicates(Path::new("/some/path")).unwrap();
//!
//! println!("Found {} duplicate groups", summary.duplicate_groups);
//! println!("Reclaimable space: {}", summary.reclaimable_space);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::scanner::{FileEntry, Hash, Hasher, ScanError, Walker, DEFAULT_CHUNK_SIZE};

use super::groups::{group_by_size, DuplicateGroup};

/// Configuration for the duplicate finder.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Number of bytes hashed by the prefix pre-filter; also the read
    /// granularity for full hashing.
    pub chunk_size: usize,
    /// Walk the full subtree instead of only the immediate entries.
    pub recursive: bool,
    /// Number of I/O threads for parallel hashing.
    /// Default is 4 to prevent disk thrashing.
    pub io_threads: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            recursive: false,
            io_threads: 4,
        }
    }
}

impl FinderConfig {
    /// Set the prefix chunk size in bytes (minimum 1).
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Enable or disable recursive traversal.
    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set the I/O thread count for the hashing stages.
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }
}

/// Statistics from the prefix-hash stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixHashStats {
    /// Files that entered the stage
    pub input_files: usize,
    /// Files successfully prefix-hashed
    pub hashed_files: usize,
    /// Files dropped due to read failures
    pub failed_files: usize,
    /// Files that could still be duplicates after regrouping
    pub potential_duplicates: usize,
    /// Prefix buckets with 2+ files
    pub duplicate_groups: usize,
}

/// Statistics from the full-hash stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FullHashStats {
    /// Files that entered the stage
    pub input_files: usize,
    /// Files successfully hashed in full
    pub hashed_files: usize,
    /// Files dropped due to read failures
    pub failed_files: usize,
    /// Total bytes hashed across all files
    pub bytes_hashed: u64,
    /// Confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Confirmed duplicate files (excluding canonicals)
    pub duplicate_files: usize,
    /// Total space reclaimable by deleting duplicates
    pub wasted_space: u64,
}

/// Build a bounded thread pool for hash I/O.
fn build_io_pool(io_threads: usize) -> rayon::ThreadPool {
    rayon::ThreadPoolBuilder::new()
        .num_threads(io_threads)
        .build()
        .unwrap_or_else(|_| {
            log::warn!(
                "Failed to create custom thread pool, using global pool with {} threads",
                rayon::current_num_threads()
            );
            rayon::ThreadPoolBuilder::new().build().unwrap()
        })
}

/// Compute prefix hashes for size buckets and regroup survivors.
///
/// For every path in a multi-member size bucket, hashes exactly the first
/// `chunk_size` bytes and regroups by the composite key `(digest, size)`.
/// The composite key prevents false merges between different-sized files
/// whose truncated prefixes collide.
///
/// A read failure drops that single path with a warning; the rest of its
/// bucket proceeds. Hashing is parallelized across files with a pool
/// bounded by `io_threads`.
#[must_use]
pub fn prefix_hash_phase(
    size_groups: HashMap<u64, Vec<FileEntry>>,
    hasher: &Hasher,
    io_threads: usize,
) -> (HashMap<(Hash, u64), Vec<FileEntry>>, PrefixHashStats) {
    let input_files: usize = size_groups.values().map(Vec::len).sum();
    let mut stats = PrefixHashStats {
        input_files,
        ..Default::default()
    };

    let all_files: Vec<FileEntry> = size_groups.into_values().flatten().collect();
    if all_files.is_empty() {
        log::debug!("Prefix stage: no files to process");
        return (HashMap::new(), stats);
    }

    log::info!("Prefix stage: hashing first bytes of {} files", all_files.len());

    let pool = build_io_pool(io_threads);
    let results: Vec<(FileEntry, Result<Hash, crate::scanner::HashError>)> = pool.install(|| {
        all_files
            .into_par_iter()
            .map(|file| {
                let res = hasher.prefix_hash(&file.path);
                if let Err(ref e) = res {
                    log::warn!("Failed to prefix-hash {}: {}", file.path.display(), e);
                }
                (file, res)
            })
            .collect()
    });

    let mut prefix_groups: HashMap<(Hash, u64), Vec<FileEntry>> = HashMap::new();
    for (file, res) in results {
        match res {
            Ok(digest) => {
                stats.hashed_files += 1;
                prefix_groups.entry((digest, file.size)).or_default().push(file);
            }
            Err(_) => stats.failed_files += 1,
        }
    }

    let filtered: HashMap<(Hash, u64), Vec<FileEntry>> = prefix_groups
        .into_iter()
        .filter(|(_, group)| group.len() > 1)
        .collect();

    stats.duplicate_groups = filtered.len();
    stats.potential_duplicates = filtered.values().map(Vec::len).sum();

    log::info!(
        "Prefix stage complete: {} files remain in {} buckets",
        stats.potential_duplicates,
        stats.duplicate_groups
    );

    (filtered, stats)
}

/// Compute full hashes for prefix buckets and emit confirmed groups.
///
/// Every path surviving into a multi-member prefix bucket is hashed over
/// its entire content. Buckets of the full digest with 2+ members become
/// [`DuplicateGroup`]s; the canonical member is the lexicographically
/// smallest path, chosen after grouping so the result does not depend on
/// worker completion order.
#[must_use]
pub fn full_hash_phase(
    prefix_groups: HashMap<(Hash, u64), Vec<FileEntry>>,
    hasher: &Hasher,
    io_threads: usize,
) -> (Vec<DuplicateGroup>, FullHashStats) {
    let input_files: usize = prefix_groups.values().map(Vec::len).sum();
    let mut stats = FullHashStats {
        input_files,
        ..Default::default()
    };

    let all_files: Vec<FileEntry> = prefix_groups.into_values().flatten().collect();
    if all_files.is_empty() {
        log::debug!("Full-hash stage: no files to process");
        return (Vec::new(), stats);
    }

    log::info!("Full-hash stage: hashing {} files in full", all_files.len());

    let pool = build_io_pool(io_threads);
    let results: Vec<(FileEntry, Result<Hash, crate::scanner::HashError>)> = pool.install(|| {
        all_files
            .into_par_iter()
            .map(|file| {
                let res = hasher.full_hash(&file.path);
                if let Err(ref e) = res {
                    log::warn!("Failed to hash {}: {}", file.path.display(), e);
                }
                (file, res)
            })
            .collect()
    });

    let mut full_groups: HashMap<Hash, (u64, Vec<PathBuf>)> = HashMap::new();
    for (file, res) in results {
        match res {
            Ok(digest) => {
                stats.hashed_files += 1;
                stats.bytes_hashed += file.size;
                let entry = full_groups.entry(digest).or_insert_with(|| (file.size, Vec::new()));
                entry.1.push(file.path);
            }
            Err(_) => stats.failed_files += 1,
        }
    }

    let mut duplicate_groups: Vec<DuplicateGroup> = full_groups
        .into_iter()
        .filter_map(|(hash, (size, paths))| DuplicateGroup::from_members(hash, size, paths))
        .collect();

    // Deterministic output order for reports and tests
    duplicate_groups.sort_by(|a, b| a.canonical.cmp(&b.canonical));

    for group in &duplicate_groups {
        log::debug!(
            "Duplicate group {}: {} files, {} bytes each",
            group.hash_hex(),
            group.duplicate_count() + 1,
            group.size
        );
    }

    stats.duplicate_groups = duplicate_groups.len();
    stats.duplicate_files = duplicate_groups.iter().map(DuplicateGroup::duplicate_count).sum();
    stats.wasted_space = duplicate_groups.iter().map(DuplicateGroup::wasted_space).sum();

    log::info!(
        "Full-hash stage complete: {} groups, {} duplicates, {} bytes reclaimable",
        stats.duplicate_groups,
        stats.duplicate_files,
        stats.wasted_space
    );

    (duplicate_groups, stats)
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Total number of candidate files enumerated
    pub total_files: usize,
    /// Total size of all enumerated files in bytes
    pub total_size: u64,
    /// Files eliminated by size grouping (unique sizes)
    pub eliminated_by_size: usize,
    /// Files that were prefix-hashed
    pub prefix_hashed: usize,
    /// Files eliminated by the prefix pre-filter
    pub eliminated_by_prefix: usize,
    /// Files that were hashed in full
    pub full_hashed: usize,
    /// Per-file hash failures across both hashing stages
    pub hash_failures: usize,
    /// Confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Confirmed duplicate files (excluding canonicals)
    pub duplicate_files: usize,
    /// Total space reclaimable by deleting duplicates
    pub reclaimable_space: u64,
    /// Duration of the entire scan
    pub scan_duration: std::time::Duration,
    /// Per-entry enumeration errors (skipped files)
    pub scan_errors: Vec<ScanError>,
}

impl ScanSummary {
    /// Percentage of scanned bytes wasted by duplicates.
    #[must_use]
    pub fn wasted_percentage(&self) -> f64 {
        if self.total_size == 0 {
            0.0
        } else {
            (self.reclaimable_space as f64 / self.total_size as f64) * 100.0
        }
    }

    /// True if any per-file errors were recorded during the scan.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.scan_errors.is_empty() || self.hash_failures > 0
    }
}

/// Errors that can occur during duplicate finding.
///
/// Per-file access failures are not represented here: those are logged,
/// counted in [`ScanSummary`], and never abort the run. The only fatal
/// errors are invalid top-level input.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided root path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided root path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Duplicate finder that orchestrates the progressive detection pipeline.
///
/// # Example
///
/// ```no_run
/// use dupescan::duplicates::{DuplicateFinder, FinderConfig};
/// use std::path::Path;
///
/// let config = FinderConfig::default().with_chunk_size(1024).with_recursive(true);
/// let finder = DuplicateFinder::new(config);
///
/// match finder.find_duplicates(Path::new(".")) {
///     Ok((groups, summary)) => {
///         println!("Found {} duplicate groups", groups.len());
///         println!("Can reclaim {} bytes", summary.reclaimable_space);
///     }
///     Err(e) => eprintln!("Scan failed: {}", e),
/// }
/// ```
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let hasher = Hasher::new(config.chunk_size);
        Self { config, hasher }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find all duplicate files under the given root.
    ///
    /// Runs the complete pipeline and returns confirmed duplicate groups
    /// (sorted by canonical path) along with summary statistics. The
    /// filesystem is never mutated.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] if the root does not exist or is not a
    /// directory. Per-file failures are recorded in the summary instead.
    pub fn find_duplicates(
        &self,
        path: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = std::time::Instant::now();
        let mut summary = ScanSummary::default();

        // Validate the root before any work starts
        if !path.exists() {
            return Err(FinderError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(FinderError::NotADirectory(path.to_path_buf()));
        }

        log::info!(
            "Starting duplicate scan of {} ({})",
            path.display(),
            if self.config.recursive {
                "recursive"
            } else {
                "single level"
            }
        );

        // Stage 1: enumerate candidates
        let walker = Walker::new(path, self.config.recursive);
        let mut files = Vec::new();
        for result in walker.walk() {
            match result {
                Ok(file) => files.push(file),
                Err(e) => {
                    log::warn!("Error reading file: {}", e);
                    summary.scan_errors.push(e);
                }
            }
        }

        summary.total_files = files.len();
        summary.total_size = files.iter().map(|f| f.size).sum();
        log::info!("Found {} candidate files", summary.total_files);

        // Stage 2: group by size
        let (size_groups, size_stats) = group_by_size(files);
        summary.eliminated_by_size = size_stats.eliminated_unique;

        if size_groups.is_empty() {
            log::info!("No potential duplicates after size grouping, scan complete");
            summary.scan_duration = start_time.elapsed();
            return Ok((Vec::new(), summary));
        }

        // Stage 3: prefix hash
        let (prefix_groups, prefix_stats) =
            prefix_hash_phase(size_groups, &self.hasher, self.config.io_threads);
        summary.prefix_hashed = prefix_stats.hashed_files;
        summary.eliminated_by_prefix =
            prefix_stats.hashed_files - prefix_stats.potential_duplicates;
        summary.hash_failures += prefix_stats.failed_files;

        if prefix_groups.is_empty() {
            log::info!("No potential duplicates after prefix hashing, scan complete");
            summary.scan_duration = start_time.elapsed();
            return Ok((Vec::new(), summary));
        }

        // Stage 4: full hash
        let (groups, full_stats) =
            full_hash_phase(prefix_groups, &self.hasher, self.config.io_threads);
        summary.full_hashed = full_stats.hashed_files;
        summary.hash_failures += full_stats.failed_files;
        summary.duplicate_groups = full_stats.duplicate_groups;
        summary.duplicate_files = full_stats.duplicate_files;
        summary.reclaimable_space = full_stats.wasted_space;
        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete in {:.2?}: {} groups, {} duplicate files",
            summary.scan_duration,
            summary.duplicate_groups,
            summary.duplicate_files
        );

        Ok((groups, summary))
    }
}
