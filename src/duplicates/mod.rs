//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Size-based file grouping (stage 2)
//! - Prefix-hash comparison (stage 3)
//! - Full-hash confirmation (stage 4)
//! - Duplicate group management and keep-file selection

pub mod finder;
pub mod groups;

pub use finder::{
    full_hash_phase, prefix_hash_phase, DuplicateFinder, FinderConfig, FinderError,
    FullHashStats, PrefixHashStats, ScanSummary,
};
pub use groups::{group_by_size, DuplicateGroup, GroupingStats};
